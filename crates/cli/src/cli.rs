// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Pluggable static-analysis runner for TeX sources
#[derive(Debug, Parser)]
#[command(name = "texcheck")]
#[command(version, about, long_about = None)]
#[command(after_help = "Exit codes: 0 clean, 1 violations, 2 usage error, 3 processing errors")]
pub struct Cli {
    /// Files, directories, or glob patterns to check
    #[arg(value_name = "PATH", required_unless_present = "list_checks")]
    pub paths: Vec<String>,

    /// Check ids to run, comma-separated (ALL = every check) [default: ALL]
    #[arg(long, value_name = "IDS", value_delimiter = ',')]
    pub select: Option<Vec<String>>,

    /// Check ids to skip, comma-separated
    #[arg(long, value_name = "IDS", value_delimiter = ',')]
    pub ignore: Option<Vec<String>>,

    /// Content kind of the files to check [default: tex]
    #[arg(long, value_name = "KIND")]
    pub kind: Option<String>,

    /// Root directory for glob patterns and relative output
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Directory of YAML check definitions (replaces the built-in checks)
    #[arg(long, value_name = "DIR")]
    pub checks_dir: Option<PathBuf>,

    /// Include hidden files and directories
    #[arg(long)]
    pub hidden: bool,

    /// Warn instead of failing when a path or pattern matches nothing
    #[arg(long)]
    pub no_strict: bool,

    /// Report absolute paths
    #[arg(long)]
    pub absolute: bool,

    /// Worker threads (0 = one per core, 1 = sequential)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Maximum violations to display
    #[arg(long, default_value_t = 50, value_name = "N")]
    pub limit: usize,

    /// Show all violations (no limit)
    #[arg(long)]
    pub no_limit: bool,

    /// List available checks and exit
    #[arg(long)]
    pub list_checks: bool,

    /// Use specific config file
    #[arg(short = 'C', long = "config", env = "TEXCHECK_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Display limit, `None` when unlimited.
    pub fn display_limit(&self) -> Option<usize> {
        if self.no_limit {
            None
        } else {
            Some(self.limit)
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
