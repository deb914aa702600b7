// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared unit test utilities.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::check::{AnalysisError, Check, Entry, Finding};

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

/// A check that reports one finding per occurrence of `needle`.
pub fn needle_check(id: &str, needle: &'static str) -> Check {
    let entry = Entry::from_fn(move |path| {
        let content =
            fs::read_to_string(path).map_err(|e| AnalysisError::Failed(e.to_string()))?;
        Ok(content
            .lines()
            .enumerate()
            .filter(|(_, line)| line.contains(needle))
            .map(|(i, _)| Finding::at_line(i as u32 + 1))
            .collect())
    });
    Check::new(id, id.to_lowercase(), entry)
}

/// A check that never reports anything.
pub fn clean_check(id: &str) -> Check {
    Check::new(id, id.to_lowercase(), Entry::from_fn(|_| Ok(Vec::new())))
}

/// A check that fails for files whose name contains `marker`.
pub fn failing_check(id: &str, marker: &'static str) -> Check {
    let entry = Entry::from_fn(move |path| {
        if path.to_string_lossy().contains(marker) {
            Err(AnalysisError::Failed(format!("cannot analyze {marker}")))
        } else {
            Ok(Vec::new())
        }
    });
    Check::new(id, id.to_lowercase(), entry)
}

/// A check that counts its invocations.
pub fn counting_check(id: &str, calls: Arc<AtomicUsize>) -> Check {
    let entry = Entry::from_fn(move |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    });
    Check::new(id, id.to_lowercase(), entry)
}
