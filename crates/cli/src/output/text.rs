// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! ```text
//! <file>:<line>: [<ID>] <message>
//! Found <n> violations in <m> files (<k> files checked)
//! ```
//!
//! Processing errors go to a separate (stderr) writer as one block.

use termcolor::{ColorChoice, StandardStream, WriteColor};

use super::{FormatOptions, count};
use crate::check::Violation;
use crate::checks::Registry;
use crate::color::scheme;
use crate::runner::{AggregateError, RunOutcome};

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    out: W,
    options: FormatOptions,
    violations_shown: usize,
    truncated: bool,
}

impl TextFormatter<StandardStream> {
    /// Formatter writing to stdout.
    pub fn stdout(color_choice: ColorChoice, options: FormatOptions) -> Self {
        Self::new(StandardStream::stdout(color_choice), options)
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(out: W, options: FormatOptions) -> Self {
        Self {
            out,
            options,
            violations_shown: 0,
            truncated: false,
        }
    }

    /// Write violations, then the truncation notice and summary.
    pub fn write_outcome(&mut self, outcome: &RunOutcome) -> std::io::Result<()> {
        self.write_violations(&outcome.violations)?;
        self.write_truncation_message(outcome.total_violations)?;
        self.write_summary(outcome)
    }

    /// Write violations up to the display limit.
    /// Returns true if output was truncated.
    pub fn write_violations(&mut self, violations: &[Violation]) -> std::io::Result<bool> {
        for violation in violations {
            if let Some(limit) = self.options.limit
                && self.violations_shown >= limit
            {
                self.truncated = true;
                return Ok(true);
            }
            self.write_violation(violation)?;
            self.violations_shown += 1;
        }
        Ok(false)
    }

    fn write_violation(&mut self, v: &Violation) -> std::io::Result<()> {
        self.out.set_color(&scheme::path())?;
        write!(self.out, "{}", v.file.display())?;
        self.out.reset()?;

        if let Some(line) = v.line {
            write!(self.out, ":")?;
            self.out.set_color(&scheme::line_number())?;
            write!(self.out, "{}", line)?;
            self.out.reset()?;
        }
        write!(self.out, ": [")?;

        self.out.set_color(&scheme::check_id())?;
        write!(self.out, "{}", v.check)?;
        self.out.reset()?;

        writeln!(self.out, "] {}", v.message)
    }

    /// Write truncation message if applicable.
    pub fn write_truncation_message(&mut self, total: usize) -> std::io::Result<()> {
        if let Some(limit) = self.options.limit
            && self.truncated
            && total > limit
        {
            writeln!(
                self.out,
                "Stopped after {} violations. Use --no-limit to see all.",
                limit
            )?;
        }
        Ok(())
    }

    /// Write the summary line.
    pub fn write_summary(&mut self, outcome: &RunOutcome) -> std::io::Result<()> {
        let checked = count(outcome.files_checked, "file");

        if outcome.total_violations == 0 && outcome.per_file_errors.is_empty() {
            self.out.set_color(&scheme::clean())?;
            write!(self.out, "No violations")?;
            self.out.reset()?;
            return writeln!(self.out, " ({} checked)", checked);
        }

        let mut affected: Vec<_> = outcome.violations.iter().map(|v| &v.file).collect();
        affected.dedup();

        self.out.set_color(&scheme::summary())?;
        write!(
            self.out,
            "Found {} in {}",
            count(outcome.total_violations, "violation"),
            count(affected.len(), "file")
        )?;
        self.out.reset()?;
        write!(self.out, " ({} checked", checked)?;
        if !outcome.per_file_errors.is_empty() {
            write!(
                self.out,
                ", {} failed",
                outcome.per_file_errors.len()
            )?;
        }
        writeln!(self.out, ")")
    }

    /// Write the loaded checks, one per line.
    pub fn write_check_list(&mut self, registry: &Registry) -> std::io::Result<()> {
        let width = registry.ids().map(str::len).max().unwrap_or(0);
        for check in registry.iter() {
            self.out.set_color(&scheme::check_id())?;
            write!(self.out, "{:width$}", check.id, width = width)?;
            self.out.reset()?;
            write!(self.out, "  {}", check.name)?;
            match check.description.lines().next() {
                Some(first) if !first.is_empty() => writeln!(self.out, ": {}", first)?,
                _ => writeln!(self.out)?,
            }
        }
        Ok(())
    }

    /// Check if output was truncated.
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }

    /// Get the number of violations shown.
    pub fn violations_shown(&self) -> usize {
        self.violations_shown
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Write the aggregate processing error as one block.
pub fn write_aggregate_error<W: WriteColor>(
    out: &mut W,
    error: &AggregateError,
) -> std::io::Result<()> {
    out.set_color(&scheme::error())?;
    write!(out, "error")?;
    out.reset()?;
    writeln!(out, ": {}", error)
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
