// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Directory traversal for discovery.
//!
//! A background thread drives the `ignore` walker in file-name order and
//! streams regular files through a bounded channel. Unreadable entries,
//! broken symlinks and symlink loops are collected as failures; discovery
//! turns any failure into a fatal [`Error::Walk`].

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender, bounded};
use ignore::WalkBuilder;

use crate::error::{Error, Result};

/// Depth limit applied when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Files buffered between the walker thread and its consumer.
const CHANNEL_CAPACITY: usize = 256;

/// Advisory cancellation flag shared between a caller and running walks.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// What a walk descends into.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Depth below the walk root; `Some(1)` lists only direct children.
    pub max_depth: Option<usize>,
    /// Honor `.gitignore`, `.git/info/exclude` and the global excludes file.
    pub git_ignore: bool,
    /// Do not descend into or yield dot-prefixed entries.
    pub skip_hidden: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            git_ignore: false,
            skip_hidden: true,
        }
    }
}

/// Everything a finished walk produced.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    /// Regular files in traversal order.
    pub files: Vec<PathBuf>,
    /// One message per entry that could not be read.
    pub failures: Vec<String>,
    /// Stopped early through the [`CancelToken`].
    pub cancelled: bool,
}

impl WalkOutcome {
    /// Files of a complete, failure-free walk.
    pub fn into_files(self, root: &Path) -> Result<Vec<PathBuf>> {
        if self.cancelled {
            return Err(Error::Cancelled);
        }
        if !self.failures.is_empty() {
            return Err(Error::Walk {
                message: format!("{}: {}", root.display(), self.failures.join("; ")),
            });
        }
        Ok(self.files)
    }
}

/// Sorted directory walker.
pub struct FileWalker {
    config: WalkerConfig,
    cancel: CancelToken,
}

impl FileWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self {
            config,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Start walking `root` on a background thread.
    ///
    /// Files arrive on the receiver as they are found; join the handle for
    /// failures and cancellation. Dropping the receiver ends the walk.
    pub fn walk(&self, root: &Path) -> (Receiver<PathBuf>, WalkHandle) {
        let (tx, rx) = bounded(CHANNEL_CAPACITY);

        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .hidden(self.config.skip_hidden)
            .git_ignore(self.config.git_ignore)
            .git_exclude(self.config.git_ignore)
            .git_global(self.config.git_ignore)
            .require_git(false)
            .follow_links(true)
            .max_depth(self.config.max_depth)
            .sort_by_file_name(|a, b| a.cmp(b));

        let cancel = self.cancel.clone();
        let thread = std::thread::spawn(move || stream_files(builder, &tx, &cancel));
        (rx, WalkHandle { thread })
    }

    /// Walk `root` to completion.
    pub fn collect(&self, root: &Path) -> WalkOutcome {
        let (rx, handle) = self.walk(root);
        let files: Vec<PathBuf> = rx.iter().collect();
        let mut outcome = handle.join();
        outcome.files = files;
        tracing::trace!(
            "walked {}: {} file(s), {} failure(s)",
            root.display(),
            outcome.files.len(),
            outcome.failures.len()
        );
        outcome
    }
}

/// Walker thread body. Returns failures and cancellation; files go to `tx`.
fn stream_files(builder: WalkBuilder, tx: &Sender<PathBuf>, cancel: &CancelToken) -> WalkOutcome {
    let mut outcome = WalkOutcome::default();

    for entry in builder.build() {
        if cancel.is_cancelled() {
            outcome.cancelled = true;
            break;
        }
        match entry {
            Ok(entry) if entry.file_type().is_some_and(|t| t.is_file()) => {
                if tx.send(entry.into_path()).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!("cannot walk entry: {}", err);
                outcome.failures.push(err.to_string());
            }
        }
    }

    outcome
}

/// Handle to a running walk.
pub struct WalkHandle {
    thread: JoinHandle<WalkOutcome>,
}

impl WalkHandle {
    /// Wait for the walker thread. A panicked thread is reported as a failure.
    pub fn join(self) -> WalkOutcome {
        self.thread.join().unwrap_or_else(|_| WalkOutcome {
            failures: vec!["walker thread panicked".to_string()],
            ..Default::default()
        })
    }
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
