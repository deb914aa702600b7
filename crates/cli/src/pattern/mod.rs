// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pattern matching for `pattern` check entries.
//!
//! Tiered by pattern structure:
//! - Single literal: memchr::memmem
//! - Multiple literals: aho-corasick
//! - Anything else: regex crate (multi-line mode)

pub mod matcher;

pub use matcher::{CompiledPattern, LineMatch, PatternError};
