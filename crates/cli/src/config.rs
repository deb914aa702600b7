// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and discovery.
//!
//! Handles texcheck.toml parsing with version validation and unknown key
//! warnings. Every setting is optional so command-line flags can layer on
//! top of it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Config file name looked up from the working directory.
pub const CONFIG_FILE_NAME: &str = "texcheck.toml";

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["version", "files", "checks", "run"];

/// Unrecognized keys of a table, kept only for warnings.
type Unknown = BTreeMap<String, toml::Value>;

/// Full configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,
    pub files: FilesConfig,
    pub checks: ChecksConfig,
    pub run: RunConfig,
}

/// `[files]`: discovery settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FilesConfig {
    /// Content kind to check (default: tex).
    pub kind: Option<String>,
    /// Include hidden paths.
    pub hidden: Option<bool>,
    /// Fail when an input matches nothing.
    pub strict: Option<bool>,
    /// Report paths relative to the root.
    pub relative: Option<bool>,

    #[serde(flatten)]
    unknown: Unknown,
}

/// `[checks]`: registry and selection settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChecksConfig {
    /// Directory of YAML check definitions.
    ///
    /// Relative paths are resolved against the config file's directory
    /// by [`load`].
    pub dir: Option<PathBuf>,
    pub select: Option<Vec<String>>,
    pub ignore: Option<Vec<String>>,

    #[serde(flatten)]
    unknown: Unknown,
}

/// `[run]`: execution settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RunConfig {
    /// Worker threads (0 = one per core).
    pub jobs: Option<usize>,

    #[serde(flatten)]
    unknown: Unknown,
}

/// Raw file layout; unknown top-level keys are captured for warnings.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: Option<i64>,

    #[serde(default)]
    files: FilesConfig,

    #[serde(default)]
    checks: ChecksConfig,

    #[serde(default)]
    run: RunConfig,

    #[serde(flatten)]
    unknown: Unknown,
}

/// Load and validate config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut config = parse(&content, path)?;
    if let Some(dir) = &config.checks.dir
        && dir.is_relative()
        && let Some(base) = path.parent()
    {
        config.checks.dir = Some(base.join(dir));
    }
    Ok(config)
}

/// Parse config content, warning on unknown keys.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let config_error = |message: String| Error::Config {
        message,
        path: Some(path.to_path_buf()),
    };

    let flexible: FlexibleConfig =
        toml::from_str(content).map_err(|e| config_error(e.to_string()))?;

    let version = flexible
        .version
        .ok_or_else(|| config_error("missing required field: version".to_string()))?;
    if version != SUPPORTED_VERSION {
        return Err(config_error(format!(
            "unsupported config version {} (supported: {})",
            version, SUPPORTED_VERSION
        )));
    }

    for key in flexible.unknown.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, key);
        }
    }
    for (section, unknown) in [
        ("files", &flexible.files.unknown),
        ("checks", &flexible.checks.unknown),
        ("run", &flexible.run.unknown),
    ] {
        for key in unknown.keys() {
            warn_unknown_key(path, &format!("{}.{}", section, key));
        }
    }

    if flexible.files.kind.as_deref().is_some_and(|k| k.trim().is_empty()) {
        return Err(config_error("files.kind must not be empty".to_string()));
    }

    Ok(Config {
        version,
        files: flexible.files,
        checks: flexible.checks,
        run: flexible.run,
    })
}

fn warn_unknown_key(path: &Path, key: &str) {
    tracing::warn!("{}: unrecognized field `{}`", path.display(), key);
    eprintln!(
        "texcheck: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

/// Find texcheck.toml starting from `start_dir` and walking up to the git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            return Some(config_path);
        }

        if current.join(".git").exists() {
            return None;
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// Resolve the config path from an explicit flag (or env var) or discovery.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) => {
            let path = cwd.join(path);
            if path.is_file() {
                Ok(Some(path))
            } else {
                Err(Error::Config {
                    message: format!("config file not found: {}", path.display()),
                    path: Some(path),
                })
            }
        }
        None => Ok(find_config(cwd)),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
