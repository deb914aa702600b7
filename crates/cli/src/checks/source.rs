// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Where check definitions come from.

use std::path::{Path, PathBuf};

use super::definition::RawDefinition;
use crate::error::{Error, Result};

/// Provider of raw check definitions.
pub trait CheckSource {
    /// Load every definition, in a stable order.
    fn load_all(&self) -> Result<Vec<RawDefinition>>;
}

/// Definitions compiled into the binary.
const BUILTIN: &[(&str, &str)] = &[
    (
        "TEX001-trailing-whitespace.yaml",
        include_str!("../../checks/TEX001-trailing-whitespace.yaml"),
    ),
    (
        "TEX002-display-math-dollars.yaml",
        include_str!("../../checks/TEX002-display-math-dollars.yaml"),
    ),
    (
        "TEX003-obsolete-font-switch.yaml",
        include_str!("../../checks/TEX003-obsolete-font-switch.yaml"),
    ),
    (
        "TEX004-eqnarray.yaml",
        include_str!("../../checks/TEX004-eqnarray.yaml"),
    ),
    (
        "TEX005-line-length.yaml",
        include_str!("../../checks/TEX005-line-length.yaml"),
    ),
];

/// The starter set of TeX checks shipped with texcheck.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinSource;

impl CheckSource for BuiltinSource {
    fn load_all(&self) -> Result<Vec<RawDefinition>> {
        Ok(BUILTIN
            .iter()
            .map(|(name, content)| RawDefinition::new(format!("builtin:{name}"), *content))
            .collect())
    }
}

/// A directory of `.yaml` / `.yml` files, one check per file.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn is_definition_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
}

impl CheckSource for DirectorySource {
    fn load_all(&self) -> Result<Vec<RawDefinition>> {
        if !self.dir.is_dir() {
            return Err(Error::Config {
                message: format!("checks directory not found: {}", self.dir.display()),
                path: Some(self.dir.clone()),
            });
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|source| Error::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::Io {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            if is_definition_file(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        tracing::debug!(
            "found {} check definition(s) in {}",
            paths.len(),
            self.dir.display()
        );

        paths
            .into_iter()
            .map(|path| {
                let content = std::fs::read_to_string(&path).map_err(|source| Error::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(RawDefinition::new(path.display().to_string(), content))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
