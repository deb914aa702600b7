// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Selection resolver.
//!
//! Turns `--select` / `--ignore` id lists into the ordered set of checks to
//! run, using set algebra over ids:
//!
//! ```text
//! candidates = ALL ∈ select ? registry : select ∩ registry
//! selected   = ALL ∈ ignore ? ∅        : candidates − ignore
//! unknown    = (select ∪ ignore) − {ALL} − registry
//! ```

use std::collections::BTreeSet;

use super::Registry;
use crate::check::Check;
use crate::error::{Error, Result};

/// Wildcard id standing for every registered check.
pub const ALL: &str = "ALL";

/// Split comma-separated values, trimming and dropping empty ids.
pub fn normalize_ids<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.as_ref().split(','))
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

/// Resolve the checks to run, in registry order.
pub fn resolve<S: AsRef<str>>(select: &[S], ignore: &[S], registry: &Registry) -> Result<Vec<Check>> {
    if select.is_empty() {
        return Err(Error::NoChecksSelected);
    }

    let known: BTreeSet<&str> = registry.ids().collect();
    let select: BTreeSet<&str> = select.iter().map(AsRef::as_ref).collect();
    let ignore: BTreeSet<&str> = ignore.iter().map(AsRef::as_ref).collect();

    let candidates: BTreeSet<&str> = if select.contains(ALL) {
        known.clone()
    } else {
        select.intersection(&known).copied().collect()
    };

    let selected: BTreeSet<&str> = if ignore.contains(ALL) {
        BTreeSet::new()
    } else {
        candidates.difference(&ignore).copied().collect()
    };

    let unknown: Vec<String> = select
        .union(&ignore)
        .filter(|id| **id != ALL && !known.contains(*id))
        .map(|id| id.to_string())
        .collect();
    if !unknown.is_empty() {
        return Err(Error::UnknownCheckId { ids: unknown });
    }

    if selected.is_empty() {
        return Err(Error::AllChecksIgnored);
    }

    tracing::debug!(
        "selected {} of {} check(s)",
        selected.len(),
        registry.len()
    );

    Ok(registry
        .iter()
        .filter(|check| selected.contains(check.id.as_str()))
        .cloned()
        .collect())
}

#[cfg(test)]
#[path = "select_tests.rs"]
mod tests;
