// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! File discovery.
//!
//! Resolves a mix of literal paths and glob patterns into an ordered,
//! deduplicated list of files of one content kind.
//!
//! Rules:
//! - inputs are made absolute against the working directory
//! - root: explicit, else the sole input when it is a directory, else cwd
//! - an existing file must be of the requested kind (hard error otherwise)
//! - an existing directory is walked; non-matching files are skipped
//! - every input is also a glob pattern over the root: its root-relative
//!   path when under the root, else its base name
//! - walk failures (unreadable entries, broken symlinks) are fatal
//! - first occurrence wins; order follows inputs, then sorted walk order

use std::path::{Component, Path, PathBuf};

use globset::GlobBuilder;
use indexmap::IndexSet;

use crate::classify::{Classifier, ExtensionClassifier, is_kind};
use crate::error::{Error, Result};
use crate::walker::{CancelToken, DEFAULT_MAX_DEPTH, FileWalker, WalkerConfig};

/// Content kind checked when none is configured.
pub const DEFAULT_KIND: &str = "tex";

/// Discovery options.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Content kind tag files must carry.
    pub kind: String,
    /// Explicit root directory.
    pub root: Option<PathBuf>,
    /// Fail when an input matches nothing.
    pub strict: bool,
    /// Rewrite results relative to the root.
    pub relative: bool,
    /// Skip paths with a segment starting with `.`.
    pub exclude_hidden: bool,
    /// Respect `.gitignore` while walking directories.
    pub git_ignore: bool,
    /// Maximum walk depth below a directory input.
    pub max_depth: Option<usize>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            kind: DEFAULT_KIND.to_string(),
            root: None,
            strict: true,
            relative: false,
            exclude_hidden: true,
            git_ignore: false,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

/// Result of discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet {
    /// Absolute root the files were resolved against.
    pub root: PathBuf,
    /// Discovered files (relative to `root` when requested).
    pub files: Vec<PathBuf>,
}

/// File discovery over a classifier.
pub struct Discovery<'a> {
    classifier: &'a dyn Classifier,
    options: DiscoveryOptions,
    cancel: CancelToken,
}

impl<'a> Discovery<'a> {
    pub fn new(classifier: &'a dyn Classifier, options: DiscoveryOptions) -> Self {
        Self {
            classifier,
            options,
            cancel: CancelToken::new(),
        }
    }

    /// Attach a cancellation token checked between inputs and during walks.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Discover files relative to the process working directory.
    pub fn discover<S: AsRef<str>>(&self, inputs: &[S]) -> Result<FileSet> {
        let cwd = std::env::current_dir().map_err(|e| Error::RootUndetermined(e.to_string()))?;
        self.discover_from(&cwd, inputs)
    }

    /// Discover files, resolving relative inputs against `cwd`.
    pub fn discover_from<S: AsRef<str>>(&self, cwd: &Path, inputs: &[S]) -> Result<FileSet> {
        let paths: Vec<(&str, PathBuf)> = inputs
            .iter()
            .map(|input| {
                let input = input.as_ref();
                (input, absolute(cwd, Path::new(input)))
            })
            .collect();

        let root = self.resolve_root(cwd, &paths)?;
        tracing::debug!("discovery root: {}", root.display());

        let mut found: IndexSet<PathBuf> = IndexSet::new();

        for (input, path) in &paths {
            if self.cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let mut matched = false;

            if path.is_file() {
                matched = true;
                if !is_kind(self.classifier, path, &self.options.kind) {
                    return Err(Error::KindMismatch {
                        path: path.clone(),
                        kind: self.options.kind.clone(),
                    });
                }
                if self.is_excluded_hidden(path, &root) {
                    tracing::warn!("skipping hidden file {}", path.display());
                } else {
                    found.insert(path.clone());
                }
            } else if path.is_dir() {
                matched = true;
                for file in self.walk(path, self.options.max_depth)? {
                    if self.accepts(&file, &root) {
                        found.insert(file);
                    }
                }
            }

            let matches = self.glob(input, path, &root)?;
            tracing::debug!("pattern '{}' matched {} file(s)", input, matches.len());
            matched |= !matches.is_empty();
            for file in matches {
                if self.accepts(&file, &root) {
                    found.insert(file);
                }
            }

            if !matched {
                if self.options.strict {
                    return Err(Error::PatternNotFound {
                        pattern: (*input).to_string(),
                    });
                }
                tracing::warn!("'{}' did not match any files", input);
            }
        }

        let files = if self.options.relative {
            found
                .into_iter()
                .map(|p| match p.strip_prefix(&root) {
                    Ok(rel) => rel.to_path_buf(),
                    Err(_) => p,
                })
                .collect()
        } else {
            found.into_iter().collect()
        };

        Ok(FileSet { root, files })
    }

    fn resolve_root(&self, cwd: &Path, paths: &[(&str, PathBuf)]) -> Result<PathBuf> {
        let root = match &self.options.root {
            Some(root) => absolute(cwd, root),
            None => match paths {
                [(_, only)] if only.is_dir() => only.clone(),
                _ => cwd.to_path_buf(),
            },
        };
        if !root.is_dir() {
            return Err(Error::RootUndetermined(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        Ok(root)
    }

    /// Kind and hidden filter for walked and globbed files.
    fn accepts(&self, path: &Path, root: &Path) -> bool {
        is_kind(self.classifier, path, &self.options.kind) && !self.is_excluded_hidden(path, root)
    }

    fn is_excluded_hidden(&self, path: &Path, root: &Path) -> bool {
        self.options.exclude_hidden && is_hidden(path, root)
    }

    fn walk(&self, dir: &Path, max_depth: Option<usize>) -> Result<Vec<PathBuf>> {
        FileWalker::new(WalkerConfig {
            max_depth,
            git_ignore: self.options.git_ignore,
            skip_hidden: self.options.exclude_hidden,
        })
        .with_cancel(self.cancel.clone())
        .collect(dir)
        .into_files(dir)
    }

    /// Evaluate an input as a glob pattern.
    ///
    /// Under the root the pattern is the root-relative path; otherwise the
    /// input's base name is matched directly inside the root.
    fn glob(&self, input: &str, path: &Path, root: &Path) -> Result<Vec<PathBuf>> {
        let pattern = match path.strip_prefix(root) {
            Ok(rel) => to_slash(rel),
            Err(_) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        if pattern.is_empty() {
            return Ok(Vec::new());
        }
        if !has_glob_meta(&pattern) {
            let candidate = root.join(&pattern);
            return Ok(if candidate.is_file() {
                vec![candidate]
            } else {
                Vec::new()
            });
        }

        let matcher = GlobBuilder::new(&pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| Error::Argument(format!("invalid pattern '{}': {}", input, e)))?
            .compile_matcher();

        let depth = if pattern.contains("**") {
            self.options.max_depth
        } else {
            Some(pattern.split('/').count())
        };

        Ok(self
            .walk(root, depth)?
            .into_iter()
            .filter(|file| {
                file.strip_prefix(root)
                    .is_ok_and(|rel| matcher.is_match(to_slash(rel)))
            })
            .collect())
    }
}

/// Discover files with the default extension classifier.
pub fn discover<S: AsRef<str>>(inputs: &[S], options: DiscoveryOptions) -> Result<FileSet> {
    let classifier = ExtensionClassifier::new();
    Discovery::new(&classifier, options).discover(inputs)
}

/// Whether any segment of `path` (root-relative when under `root`) is hidden.
pub fn is_hidden(path: &Path, root: &Path) -> bool {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components().any(|c| match c {
        Component::Normal(name) => name.to_string_lossy().starts_with('.'),
        _ => false,
    })
}

fn has_glob_meta(input: &str) -> bool {
    input.contains(['*', '?', '[', '{'])
}

/// Make `path` absolute against `cwd` and lexically normalize it.
fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    let joined = cwd.join(path);
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
