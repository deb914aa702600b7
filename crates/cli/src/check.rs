// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check model shared by the registry, selection resolver, and runner.
//!
//! A [`Check`] is immutable metadata plus an [`Entry`]: an opaque
//! capability that turns a file path into findings, or fails.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

/// Failure raised while analyzing a single file.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file too large: {} ({} bytes, max: {} bytes)", .path.display(), .size, .max_size)]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    #[error("{} is not valid UTF-8", .path.display())]
    NotUtf8 { path: PathBuf },

    #[error("command '{program}' failed: {message}")]
    Command { program: String, message: String },

    #[error("{0}")]
    Failed(String),
}

/// A location reported by an analyzer inside one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Finding {
    /// 1-based line number, when the analyzer knows it.
    pub line: Option<u32>,
    /// Extra text appended to the check message.
    pub detail: Option<String>,
}

impl Finding {
    /// Finding without a location.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finding on a specific line.
    pub fn at_line(line: u32) -> Self {
        Self {
            line: Some(line),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Executable analysis logic behind a check.
///
/// Implementations hold no mutable state: the same analyzer is invoked
/// concurrently on different files.
pub trait Analyzer: Send + Sync {
    /// Type tag of the entry (e.g. "pattern", "command").
    fn kind(&self) -> &'static str;

    /// Analyze one file.
    fn analyze(&self, path: &Path) -> Result<Vec<Finding>, AnalysisError>;
}

/// Analyzer backed by a closure.
struct FnAnalyzer<F>(F);

impl<F> Analyzer for FnAnalyzer<F>
where
    F: Fn(&Path) -> Result<Vec<Finding>, AnalysisError> + Send + Sync,
{
    fn kind(&self) -> &'static str {
        "fn"
    }

    fn analyze(&self, path: &Path) -> Result<Vec<Finding>, AnalysisError> {
        (self.0)(path)
    }
}

/// Shared handle to a check's analyzer (Arc for O(1) clone).
#[derive(Clone)]
pub struct Entry(Arc<dyn Analyzer>);

impl Entry {
    pub fn new(analyzer: impl Analyzer + 'static) -> Self {
        Self(Arc::new(analyzer))
    }

    /// Wrap a closure as an entry.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Path) -> Result<Vec<Finding>, AnalysisError> + Send + Sync + 'static,
    {
        Self(Arc::new(FnAnalyzer(f)))
    }

    pub fn kind(&self) -> &'static str {
        self.0.kind()
    }

    /// Run the analyzer against a file.
    pub fn invoke(&self, path: &Path) -> Result<Vec<Finding>, AnalysisError> {
        self.0.analyze(path)
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entry").field(&self.kind()).finish()
    }
}

/// A single analysis rule.
#[derive(Debug, Clone)]
pub struct Check {
    /// Unique identifier (e.g., "TEX001").
    pub id: String,
    /// Human-readable label.
    pub name: String,
    /// Text shown for each violation.
    pub message: String,
    /// Longer explanation for listings.
    pub description: String,
    pub entry: Entry,
}

impl Check {
    /// Create a check whose message defaults to its name.
    pub fn new(id: impl Into<String>, name: impl Into<String>, entry: Entry) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            message: name.clone(),
            name,
            description: String::new(),
            entry,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A violation reported by a check against a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub file: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Id of the check that reported it.
    pub check: String,

    pub message: String,
}

impl Violation {
    /// Build a violation from a check and one of its findings.
    pub fn from_finding(file: &Path, check: &Check, finding: Finding) -> Self {
        let message = match finding.detail {
            Some(detail) => format!("{}: {}", check.message, detail),
            None => check.message.clone(),
        };
        Self {
            file: file.to_path_buf(),
            line: finding.line,
            check: check.id.clone(),
            message,
        }
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
