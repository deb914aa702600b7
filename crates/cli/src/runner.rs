// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check execution and outcome aggregation.
//!
//! Files are processed in parallel using rayon. Each file runs every
//! selected check in order; a failure (error or panic) stops that file,
//! drops its findings and is recorded, while other files continue. Results
//! are collected in input order so totals and reports are deterministic.

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::check::{Check, Violation};
use crate::discovery::FileSet;
use crate::error::ExitCode;

/// Configuration for the check runner.
#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    /// Worker threads (None or 0 = rayon default, 1 = sequential).
    pub jobs: Option<usize>,
}

/// A file that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    pub file: PathBuf,
    pub reason: String,
}

/// Overall result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Clean,
    ViolationsFound,
    ProcessingFailed,
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Clean => ExitCode::Success,
            RunStatus::ViolationsFound => ExitCode::ViolationsFound,
            RunStatus::ProcessingFailed => ExitCode::ProcessingFailed,
        }
    }
}

/// Every per-file failure of a run, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateError {
    pub errors: Vec<FileError>,
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} file(s) could not be processed:",
            self.errors.len()
        )?;
        for error in &self.errors {
            write!(f, "\n  {}: {}", error.file.display(), error.reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateError {}

/// Accumulated results of running checks over files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    pub files_checked: usize,
    pub total_violations: usize,
    /// Violations in file order, then check order, then finding order.
    pub violations: Vec<Violation>,
    pub per_file_errors: Vec<FileError>,
}

impl RunOutcome {
    /// Errors take precedence over violations.
    pub fn status(&self) -> RunStatus {
        if !self.per_file_errors.is_empty() {
            RunStatus::ProcessingFailed
        } else if self.total_violations > 0 {
            RunStatus::ViolationsFound
        } else {
            RunStatus::Clean
        }
    }

    /// The aggregate processing error, if any file failed.
    pub fn aggregate_error(&self) -> Option<AggregateError> {
        (!self.per_file_errors.is_empty()).then(|| AggregateError {
            errors: self.per_file_errors.clone(),
        })
    }

    fn merge(&mut self, report: FileReport) {
        self.files_checked += 1;
        self.total_violations += report.violations.len();
        self.violations.extend(report.violations);
        if let Some(error) = report.error {
            self.per_file_errors.push(error);
        }
    }
}

impl From<&RunOutcome> for ExitCode {
    fn from(outcome: &RunOutcome) -> Self {
        outcome.status().into()
    }
}

/// Result of running the checks against one file.
struct FileReport {
    violations: Vec<Violation>,
    error: Option<FileError>,
}

/// Runs checks over files.
pub struct CheckRunner {
    config: RunnerConfig,
}

impl CheckRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Run checks over files as given.
    pub fn run(&self, files: &[PathBuf], checks: &[Check]) -> RunOutcome {
        self.run_in(None, files, checks)
    }

    /// Run checks over discovered files; relative paths resolve against the
    /// set's root but are reported as discovered.
    pub fn run_file_set(&self, set: &FileSet, checks: &[Check]) -> RunOutcome {
        self.run_in(Some(&set.root), &set.files, checks)
    }

    fn run_in(&self, root: Option<&Path>, files: &[PathBuf], checks: &[Check]) -> RunOutcome {
        let process = |file: &PathBuf| {
            let target = match root {
                Some(root) => root.join(file),
                None => file.clone(),
            };
            check_file(file, &target, checks)
        };

        let reports: Vec<FileReport> = match self.config.jobs {
            Some(1) => files.iter().map(process).collect(),
            Some(n) if n > 1 => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
                Ok(pool) => pool.install(|| files.par_iter().map(process).collect()),
                Err(e) => {
                    tracing::warn!("cannot start {} worker threads: {}", n, e);
                    files.par_iter().map(process).collect()
                }
            },
            _ => files.par_iter().map(process).collect(),
        };

        let mut outcome = RunOutcome::default();
        for report in reports {
            outcome.merge(report);
        }
        tracing::debug!(
            "checked {} file(s): {} violation(s), {} error(s)",
            outcome.files_checked,
            outcome.total_violations,
            outcome.per_file_errors.len()
        );
        outcome
    }
}

/// Run every check against one file.
///
/// The first failure discards the file's findings and skips its remaining
/// checks, so a failed file contributes an error and nothing else.
fn check_file(shown: &Path, target: &Path, checks: &[Check]) -> FileReport {
    let mut violations = Vec::new();

    for check in checks {
        tracing::trace!("running {} on {}", check.id, shown.display());

        let reason = match catch_unwind(AssertUnwindSafe(|| check.entry.invoke(target))) {
            Ok(Ok(findings)) => {
                violations.extend(
                    findings
                        .into_iter()
                        .map(|finding| Violation::from_finding(shown, check, finding)),
                );
                continue;
            }
            Ok(Err(e)) => format!("{}: {}", check.id, e),
            Err(payload) => format!("{}: check panicked: {}", check.id, panic_message(&*payload)),
        };

        tracing::debug!("{} failed: {}", shown.display(), reason);
        return FileReport {
            violations: Vec::new(),
            error: Some(FileError {
                file: shown.to_path_buf(),
                reason,
            }),
        };
    }

    FileReport {
        violations,
        error: None,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
