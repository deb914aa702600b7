// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

/// texcheck error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// The selection list was empty.
    #[error("no checks selected to run")]
    NoChecksSelected,

    /// Every selected check was removed by the ignore list.
    #[error("all selected checks were ignored")]
    AllChecksIgnored,

    /// One or more ids are not in the registry.
    #[error("unknown check id(s): {}", .ids.join(", "))]
    UnknownCheckId { ids: Vec<String> },

    /// Two check definitions share an id.
    #[error("duplicate check id '{id}' ({})", .source_name)]
    DuplicateCheckId { id: String, source_name: String },

    /// A check definition is missing required fields or fails to parse.
    #[error("malformed check definition {source_name}: {message}")]
    MalformedCheckDefinition {
        source_name: String,
        message: String,
    },

    /// A path or pattern matched nothing under strict discovery.
    #[error("pattern '{pattern}' did not match any files")]
    PatternNotFound { pattern: String },

    /// An explicitly named file is not of the requested kind.
    #[error("{} is not a '{kind}' file", .path.display())]
    KindMismatch { path: PathBuf, kind: String },

    /// No root directory could be determined for discovery.
    #[error("could not determine root directory: {0}")]
    RootUndetermined(String),

    /// Discovery was cancelled by the caller.
    #[error("discovery cancelled")]
    Cancelled,

    /// File I/O error
    #[error("io error: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory could not be fully walked during discovery.
    #[error("walk error: {message}")]
    Walk { message: String },
}

/// Result type using texcheck Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
///
/// Violations and processing failures stay distinguishable to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// No violations, no errors
    Success = 0,
    /// One or more violations found
    ViolationsFound = 1,
    /// Invalid invocation: config, selection, registry, or discovery error
    UsageError = 2,
    /// One or more files could not be processed
    ProcessingFailed = 3,
}

/// Library errors are raised while loading config or checks or discovering
/// files, before any file is analyzed. Per-file failures are not [`Error`]s.
impl From<&Error> for ExitCode {
    fn from(_: &Error) -> Self {
        ExitCode::UsageError
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
