// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pattern compilation and line-resolved matching.

use aho_corasick::AhoCorasick;
use memchr::memmem::Finder;
use regex::{Regex, RegexBuilder};

/// Characters that make a pattern need the regex engine.
const REGEX_META: &[char] = &[
    '\\', '.', '*', '+', '?', '(', ')', '[', ']', '{', '}', '^', '$', '|',
];

/// A pattern compiled to the cheapest engine that can run it.
pub struct CompiledPattern {
    engine: Engine,
}

enum Engine {
    /// One literal, searched with memchr's memmem.
    Literal { finder: Finder<'static>, len: usize },
    /// `a|b|c` of plain literals, one Aho-Corasick pass.
    Alternatives(AhoCorasick),
    /// Everything else. `^`/`$` anchor at line boundaries (LF or CRLF).
    Regex(Regex),
}

/// A match and the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub line: u32,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

impl CompiledPattern {
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::InvalidPattern("empty pattern".into()));
        }

        let engine = if !pattern.contains(REGEX_META) {
            Engine::Literal {
                finder: Finder::new(pattern).into_owned(),
                len: pattern.len(),
            }
        } else if let Some(alternatives) = literal_alternatives(pattern) {
            let automaton = AhoCorasick::new(alternatives)
                .map_err(|e| PatternError::InvalidPattern(e.to_string()))?;
            Engine::Alternatives(automaton)
        } else {
            Engine::Regex(RegexBuilder::new(pattern).multi_line(true).crlf(true).build()?)
        };
        Ok(Self { engine })
    }

    /// Engine chosen at compile time: `literal`, `alternatives` or `regex`.
    pub fn engine(&self) -> &'static str {
        match self.engine {
            Engine::Literal { .. } => "literal",
            Engine::Alternatives(_) => "alternatives",
            Engine::Regex(_) => "regex",
        }
    }

    /// Every non-overlapping match, in order, with its line number.
    pub fn find_lines(&self, content: &str) -> Vec<LineMatch> {
        let mut cursor = LineCursor::default();
        let mut found = Vec::new();
        let mut push = |start: usize, end: usize| {
            found.push(LineMatch {
                line: cursor.line_at(content.as_bytes(), start),
                text: content[start..end].to_string(),
            });
        };

        match &self.engine {
            Engine::Literal { finder, len } => finder
                .find_iter(content.as_bytes())
                .for_each(|start| push(start, start + len)),
            Engine::Alternatives(automaton) => automaton
                .find_iter(content)
                .for_each(|m| push(m.start(), m.end())),
            Engine::Regex(regex) => regex
                .find_iter(content)
                .for_each(|m| push(m.start(), m.end())),
        }
        found
    }
}

/// Splits `foo|bar|baz` into its branches when every branch is a non-empty
/// plain literal.
fn literal_alternatives(pattern: &str) -> Option<Vec<&str>> {
    let branches: Vec<&str> = pattern.split('|').collect();
    let plain = |branch: &&str| !branch.is_empty() && !branch.contains(REGEX_META);
    (branches.len() > 1 && branches.iter().all(plain)).then_some(branches)
}

/// Resolves ascending byte offsets to line numbers in one forward pass.
struct LineCursor {
    offset: usize,
    line: u32,
}

impl Default for LineCursor {
    fn default() -> Self {
        Self { offset: 0, line: 1 }
    }
}

impl LineCursor {
    fn line_at(&mut self, content: &[u8], offset: usize) -> u32 {
        if offset > self.offset {
            self.line += memchr::memchr_iter(b'\n', &content[self.offset..offset]).count() as u32;
            self.offset = offset;
        }
        self.line
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
