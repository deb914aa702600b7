// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::test_utils::create_tree;
use tempfile::TempDir;

fn relative(files: &[PathBuf], root: &Path) -> Vec<String> {
    files
        .iter()
        .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect()
}

#[test]
fn yields_files_in_name_order() {
    let tmp = TempDir::new().unwrap();
    create_tree(
        tmp.path(),
        &[
            ("main.tex", ""),
            ("appendix.tex", ""),
            ("chapters/2-results.tex", ""),
            ("chapters/1-intro.tex", ""),
        ],
    );

    let walker = FileWalker::new(WalkerConfig::default());
    let first = walker.collect(tmp.path());
    let second = walker.collect(tmp.path());

    assert_eq!(
        relative(&first.files, tmp.path()),
        ["appendix.tex", "chapters/1-intro.tex", "chapters/2-results.tex", "main.tex"]
    );
    assert_eq!(first.files, second.files);
    assert!(first.failures.is_empty());
    assert!(!first.cancelled);
}

#[test]
fn directories_are_not_yielded() {
    let tmp = TempDir::new().unwrap();
    create_tree(tmp.path(), &[("figures/plot.pdf", "")]);
    std::fs::create_dir(tmp.path().join("empty")).unwrap();

    let outcome = FileWalker::new(WalkerConfig::default()).collect(tmp.path());
    assert_eq!(relative(&outcome.files, tmp.path()), ["figures/plot.pdf"]);
}

#[test]
fn hidden_entries_follow_config() {
    let tmp = TempDir::new().unwrap();
    create_tree(tmp.path(), &[("main.tex", ""), (".drafts/old.tex", "")]);

    let skipped = FileWalker::new(WalkerConfig::default()).collect(tmp.path());
    assert_eq!(relative(&skipped.files, tmp.path()), ["main.tex"]);

    let walker = FileWalker::new(WalkerConfig {
        skip_hidden: false,
        ..Default::default()
    });
    let included = walker.collect(tmp.path());
    assert_eq!(
        relative(&included.files, tmp.path()),
        [".drafts/old.tex", "main.tex"]
    );
}

#[test]
fn gitignore_only_when_enabled() {
    let tmp = TempDir::new().unwrap();
    create_tree(
        tmp.path(),
        &[(".gitignore", "build/\n"), ("build/main.tex", ""), ("main.tex", "")],
    );

    let all = FileWalker::new(WalkerConfig::default()).collect(tmp.path());
    assert_eq!(all.files.len(), 2);

    let walker = FileWalker::new(WalkerConfig {
        git_ignore: true,
        ..Default::default()
    });
    let filtered = walker.collect(tmp.path());
    assert_eq!(relative(&filtered.files, tmp.path()), ["main.tex"]);
}

#[test]
fn depth_one_lists_direct_children() {
    let tmp = TempDir::new().unwrap();
    create_tree(tmp.path(), &[("main.tex", ""), ("chapters/intro.tex", "")]);

    let walker = FileWalker::new(WalkerConfig {
        max_depth: Some(1),
        ..Default::default()
    });
    let outcome = walker.collect(tmp.path());
    assert_eq!(relative(&outcome.files, tmp.path()), ["main.tex"]);
}

#[test]
fn files_stream_before_join() {
    let tmp = TempDir::new().unwrap();
    create_tree(tmp.path(), &[("a.tex", ""), ("b.tex", "")]);

    let (rx, handle) = FileWalker::new(WalkerConfig::default()).walk(tmp.path());
    let first = rx.recv().unwrap();
    assert!(first.ends_with("a.tex"));
    drop(rx);

    let outcome = handle.join();
    assert!(outcome.failures.is_empty());
}

#[test]
fn cancelled_walk_reports_cancellation() {
    let tmp = TempDir::new().unwrap();
    create_tree(tmp.path(), &[("a.tex", ""), ("b.tex", "")]);

    let cancel = CancelToken::new();
    cancel.cancel();
    let outcome = FileWalker::new(WalkerConfig::default())
        .with_cancel(cancel)
        .collect(tmp.path());

    assert!(outcome.files.is_empty());
    assert!(outcome.cancelled);
    assert!(matches!(
        outcome.into_files(tmp.path()),
        Err(Error::Cancelled)
    ));
}

#[cfg(unix)]
#[test]
fn broken_symlink_is_a_walk_failure() {
    let tmp = TempDir::new().unwrap();
    create_tree(tmp.path(), &[("main.tex", "")]);
    std::os::unix::fs::symlink(tmp.path().join("missing.tex"), tmp.path().join("dangling.tex"))
        .unwrap();

    let outcome = FileWalker::new(WalkerConfig::default()).collect(tmp.path());
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(relative(&outcome.files, tmp.path()), ["main.tex"]);

    match outcome.into_files(tmp.path()) {
        Err(Error::Walk { message }) => assert!(message.contains("dangling.tex"), "{message}"),
        other => panic!("expected walk error, got {:?}", other),
    }
}

#[cfg(unix)]
#[test]
fn symlink_loop_is_a_walk_failure() {
    let tmp = TempDir::new().unwrap();
    create_tree(tmp.path(), &[("chapters/intro.tex", "")]);
    std::os::unix::fs::symlink(tmp.path(), tmp.path().join("chapters/back")).unwrap();

    let outcome = FileWalker::new(WalkerConfig::default()).collect(tmp.path());
    assert!(!outcome.failures.is_empty());
    assert!(matches!(
        outcome.into_files(tmp.path()),
        Err(Error::Walk { .. })
    ));
}

#[test]
fn empty_directory_is_clean() {
    let tmp = TempDir::new().unwrap();

    let files = FileWalker::new(WalkerConfig::default())
        .collect(tmp.path())
        .into_files(tmp.path())
        .unwrap();
    assert!(files.is_empty());
}
