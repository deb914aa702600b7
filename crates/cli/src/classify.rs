// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Content-kind classification.
//!
//! A [`Classifier`] maps a path to a set of tags (`file`, `text`, `tex`, ...).
//! Discovery only asks one question of it: does the path carry the requested
//! kind tag? See [`is_kind`].

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Tag assigned to every existing regular file.
pub const TAG_FILE: &str = "file";
/// Tag assigned to every existing directory.
pub const TAG_DIRECTORY: &str = "directory";
/// Tag assigned to files with a known text extension.
pub const TAG_TEXT: &str = "text";
/// Tag assigned to files with a known binary extension.
pub const TAG_BINARY: &str = "binary";

/// Source of content-kind tags for a path.
pub trait Classifier: Send + Sync {
    /// Tags describing the path. Non-existent paths have no tags.
    fn tags_for(&self, path: &Path) -> BTreeSet<String>;
}

/// Whether `path` is classified as `kind`.
///
/// Never fails: a missing or unreadable path is simply not of any kind.
pub fn is_kind(classifier: &dyn Classifier, path: &Path, kind: &str) -> bool {
    classifier.tags_for(path).contains(kind)
}

/// Text extensions and the kind tag each carries.
const TEXT_EXTENSIONS: &[(&str, &str)] = &[
    ("tex", "tex"),
    ("ltx", "tex"),
    ("sty", "tex"),
    ("cls", "tex"),
    ("dtx", "tex"),
    ("bib", "bib"),
    ("bst", "bib"),
    ("md", "markdown"),
    ("markdown", "markdown"),
    ("rst", "rst"),
    ("txt", "plain-text"),
    ("py", "python"),
    ("rs", "rust"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("toml", "toml"),
    ("json", "json"),
    ("sh", "shell"),
    ("bash", "shell"),
    ("html", "html"),
    ("xml", "xml"),
    ("csv", "csv"),
];

/// Binary extensions and the kind tag each carries.
const BINARY_EXTENSIONS: &[(&str, &str)] = &[
    ("pdf", "pdf"),
    ("png", "image"),
    ("jpg", "image"),
    ("jpeg", "image"),
    ("gif", "image"),
    ("eps", "image"),
    ("dvi", "dvi"),
    ("zip", "archive"),
    ("gz", "archive"),
];

/// Classifies files by extension.
#[derive(Debug, Clone)]
pub struct ExtensionClassifier {
    /// Lowercase extension -> (kind tag, is text).
    extensions: HashMap<String, (String, bool)>,
}

impl Default for ExtensionClassifier {
    fn default() -> Self {
        let mut extensions = HashMap::new();
        for (ext, kind) in TEXT_EXTENSIONS {
            extensions.insert((*ext).to_string(), ((*kind).to_string(), true));
        }
        for (ext, kind) in BINARY_EXTENSIONS {
            extensions.insert((*ext).to_string(), ((*kind).to_string(), false));
        }
        Self { extensions }
    }
}

impl ExtensionClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register additional text extensions for a kind.
    pub fn with_text_kind(mut self, kind: &str, extensions: &[&str]) -> Self {
        for ext in extensions {
            let ext = ext.trim_start_matches('.').to_ascii_lowercase();
            self.extensions.insert(ext, (kind.to_string(), true));
        }
        self
    }
}

impl Classifier for ExtensionClassifier {
    fn tags_for(&self, path: &Path) -> BTreeSet<String> {
        let mut tags = BTreeSet::new();
        let Ok(meta) = std::fs::metadata(path) else {
            return tags;
        };

        if meta.is_dir() {
            tags.insert(TAG_DIRECTORY.to_string());
            return tags;
        }
        if !meta.is_file() {
            return tags;
        }
        tags.insert(TAG_FILE.to_string());

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        if let Some((kind, is_text)) = ext.and_then(|e| self.extensions.get(&e)) {
            tags.insert(kind.clone());
            tags.insert(if *is_text { TAG_TEXT } else { TAG_BINARY }.to_string());
        }
        tags
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
