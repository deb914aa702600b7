// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! texcheck: a pluggable static-analysis runner for TeX sources.
//!
//! Discovery resolves paths and glob patterns into files of one content
//! kind, the registry loads checks from YAML definitions, the selection
//! resolver applies `--select` / `--ignore`, and the runner executes the
//! selected checks per file with failure isolation.

pub mod check;
pub mod checks;
pub mod classify;
pub mod cli;
pub mod color;
pub mod config;
pub mod discovery;
pub mod error;
pub mod output;
pub mod pattern;
pub mod reader;
pub mod runner;
pub mod walker;

pub use check::{AnalysisError, Analyzer, Check, Entry, Finding, Violation};
pub use checks::{Registry, resolve};
pub use classify::{Classifier, ExtensionClassifier, is_kind};
pub use cli::{Cli, OutputFormat};
pub use config::Config;
pub use discovery::{Discovery, DiscoveryOptions, FileSet, discover};
pub use error::{Error, ExitCode, Result};
pub use reader::FileReader;
pub use runner::{AggregateError, CheckRunner, FileError, RunOutcome, RunStatus, RunnerConfig};
pub use walker::{CancelToken, FileWalker, WalkOutcome, WalkerConfig};

#[cfg(test)]
pub mod test_utils;
