// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! JSON is buffered and written at the end (not streamed). The display
//! limit does not apply: the document always carries every violation.

use std::io::Write;

use chrono::Utc;
use serde::Serialize;

use crate::check::Violation;
use crate::checks::Registry;
use crate::runner::{FileError, RunOutcome, RunStatus};

/// Top-level JSON document for a run.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub timestamp: String,
    pub status: RunStatus,
    pub files_checked: usize,
    pub total_violations: usize,
    pub violations: &'a [Violation],
    pub errors: &'a [FileError],
}

impl<'a> JsonReport<'a> {
    /// Report stamped with the current time.
    pub fn new(outcome: &'a RunOutcome) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            status: outcome.status(),
            files_checked: outcome.files_checked,
            total_violations: outcome.total_violations,
            violations: &outcome.violations,
            errors: &outcome.per_file_errors,
        }
    }
}

/// One entry of `--list-checks` output.
#[derive(Debug, Serialize)]
struct CheckInfo<'a> {
    id: &'a str,
    name: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    entry: &'static str,
}

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the complete JSON report.
    pub fn write(&mut self, outcome: &RunOutcome) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&JsonReport::new(outcome))
            .map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)
    }

    /// Write the loaded checks as a JSON array.
    pub fn write_check_list(&mut self, registry: &Registry) -> std::io::Result<()> {
        let checks: Vec<CheckInfo<'_>> = registry
            .iter()
            .map(|check| CheckInfo {
                id: &check.id,
                name: &check.name,
                message: &check.message,
                description: (!check.description.is_empty()).then_some(check.description.as_str()),
                entry: check.entry.kind(),
            })
            .collect();
        let json = serde_json::to_string_pretty(&checks).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
