// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Entry kinds a check definition can declare.
//!
//! Each `type` tag compiles to an [`Analyzer`] once, at registry load.

use std::path::Path;
use std::process::Command;

use regex::Regex;
use serde::Deserialize;

use crate::check::{AnalysisError, Analyzer, Entry, Finding};
use crate::pattern::CompiledPattern;
use crate::reader::FileReader;

/// Exit codes a command entry treats as a completed analysis.
fn default_ok_codes() -> Vec<i32> {
    vec![0, 1]
}

/// Declarative entry, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EntrySpec {
    /// One violation per pattern match.
    Pattern {
        pattern: String,
        /// Ignore matches on lines that start with `%`.
        #[serde(default)]
        skip_comments: bool,
    },

    /// One violation per line longer than `max` characters.
    LineLength { max: usize },

    /// External program; each stdout line is a violation.
    Command {
        program: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default = "default_ok_codes")]
        ok_codes: Vec<i32>,
    },
}

impl EntrySpec {
    /// Compile into an executable entry.
    pub fn compile(&self) -> Result<Entry, String> {
        match self {
            EntrySpec::Pattern {
                pattern,
                skip_comments,
            } => {
                let compiled = CompiledPattern::compile(pattern).map_err(|e| e.to_string())?;
                Ok(Entry::new(PatternAnalyzer {
                    pattern: compiled,
                    skip_comments: *skip_comments,
                    reader: FileReader::new(),
                }))
            }
            EntrySpec::LineLength { max } => {
                if *max == 0 {
                    return Err("line-length 'max' must be greater than 0".into());
                }
                Ok(Entry::new(LineLengthAnalyzer {
                    max: *max,
                    reader: FileReader::new(),
                }))
            }
            EntrySpec::Command {
                program,
                args,
                ok_codes,
            } => {
                if program.trim().is_empty() {
                    return Err("command 'program' must not be empty".into());
                }
                let location = Regex::new(r"^[^:]*:(\d+):\s*(.*)$").map_err(|e| e.to_string())?;
                Ok(Entry::new(CommandAnalyzer {
                    program: program.clone(),
                    args: args.clone(),
                    ok_codes: ok_codes.clone(),
                    location,
                }))
            }
        }
    }
}

/// Whether a line is a TeX comment line.
fn is_comment_line(line: &str) -> bool {
    line.trim_start().starts_with('%')
}

struct PatternAnalyzer {
    pattern: CompiledPattern,
    skip_comments: bool,
    reader: FileReader,
}

impl Analyzer for PatternAnalyzer {
    fn kind(&self) -> &'static str {
        "pattern"
    }

    fn analyze(&self, path: &Path) -> Result<Vec<Finding>, AnalysisError> {
        let content = self.reader.read_text(path)?;
        let lines: Vec<&str> = if self.skip_comments {
            content.lines().collect()
        } else {
            Vec::new()
        };

        Ok(self
            .pattern
            .find_lines(&content)
            .into_iter()
            .filter(|m| {
                !self.skip_comments
                    || !lines
                        .get(m.line as usize - 1)
                        .is_some_and(|line| is_comment_line(line))
            })
            .map(|m| {
                let finding = Finding::at_line(m.line);
                let text = m.text.trim();
                if text.is_empty() {
                    finding
                } else {
                    finding.with_detail(text)
                }
            })
            .collect())
    }
}

struct LineLengthAnalyzer {
    max: usize,
    reader: FileReader,
}

impl Analyzer for LineLengthAnalyzer {
    fn kind(&self) -> &'static str {
        "line-length"
    }

    fn analyze(&self, path: &Path) -> Result<Vec<Finding>, AnalysisError> {
        let content = self.reader.read_text(path)?;
        Ok(content
            .lines()
            .enumerate()
            .filter_map(|(i, line)| {
                let len = line.chars().count();
                (len > self.max).then(|| {
                    Finding::at_line(i as u32 + 1).with_detail(format!("{} > {}", len, self.max))
                })
            })
            .collect())
    }
}

struct CommandAnalyzer {
    program: String,
    args: Vec<String>,
    ok_codes: Vec<i32>,
    /// Extracts `<path>:<line>: <text>` from output lines.
    location: Regex,
}

impl CommandAnalyzer {
    fn parse_line(&self, line: &str) -> Finding {
        if let Some(caps) = self.location.captures(line)
            && let Ok(number) = caps[1].parse::<u32>()
        {
            let finding = Finding::at_line(number);
            let text = caps[2].trim();
            return if text.is_empty() {
                finding
            } else {
                finding.with_detail(text)
            };
        }
        Finding::new().with_detail(line.trim())
    }
}

impl Analyzer for CommandAnalyzer {
    fn kind(&self) -> &'static str {
        "command"
    }

    fn analyze(&self, path: &Path) -> Result<Vec<Finding>, AnalysisError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
            .map_err(|e| AnalysisError::Command {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        let code = output.status.code();
        if !code.is_some_and(|c| self.ok_codes.contains(&c)) {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.lines().next().unwrap_or("").trim();
            let status = match code {
                Some(c) => format!("exit code {c}"),
                None => "terminated by signal".to_string(),
            };
            return Err(AnalysisError::Command {
                program: self.program.clone(),
                message: if detail.is_empty() {
                    status
                } else {
                    format!("{status}: {detail}")
                },
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        tracing::trace!("{} produced {} bytes", self.program, stdout.len());
        Ok(stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| self.parse_line(line))
            .collect())
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
