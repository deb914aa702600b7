// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check registry.
//!
//! Definitions are read from a [`CheckSource`], parsed, and kept in load
//! order keyed by id. The registry is built once per run and passed
//! explicitly to the selection resolver.

pub mod definition;
pub mod entry;
pub mod select;
pub mod source;

pub use definition::{RawDefinition, parse};
pub use entry::EntrySpec;
pub use select::{ALL, normalize_ids, resolve};
pub use source::{BuiltinSource, CheckSource, DirectorySource};

use indexmap::IndexMap;
use indexmap::map::Entry as MapEntry;

use crate::check::Check;
use crate::error::{Error, Result};

/// Loaded checks, in definition order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    checks: IndexMap<String, Check>,
}

impl Registry {
    /// Build a registry from already-constructed checks.
    pub fn from_checks(checks: impl IntoIterator<Item = Check>) -> Result<Self> {
        Self::insert_all(checks.into_iter().map(|c| ("<programmatic>".to_string(), c)))
    }

    /// Load and parse every definition from a source.
    pub fn load(source: &dyn CheckSource) -> Result<Self> {
        let raws = source.load_all()?;
        let mut parsed = Vec::with_capacity(raws.len());
        for raw in &raws {
            parsed.push((raw.source_name.clone(), parse(raw)?));
        }
        let registry = Self::insert_all(parsed)?;
        tracing::debug!("loaded {} check(s)", registry.len());
        Ok(registry)
    }

    fn insert_all(checks: impl IntoIterator<Item = (String, Check)>) -> Result<Self> {
        let mut map = IndexMap::new();
        for (source_name, check) in checks {
            if check.id.is_empty() {
                return Err(Error::MalformedCheckDefinition {
                    source_name,
                    message: "missing required field 'id'".into(),
                });
            }
            match map.entry(check.id.clone()) {
                MapEntry::Occupied(_) => {
                    return Err(Error::DuplicateCheckId {
                        id: check.id,
                        source_name,
                    });
                }
                MapEntry::Vacant(slot) => {
                    slot.insert(check);
                }
            }
        }
        Ok(Self { checks: map })
    }

    pub fn get(&self, id: &str) -> Option<&Check> {
        self.checks.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.checks.contains_key(id)
    }

    /// Checks in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Check> {
        self.checks.values()
    }

    /// Ids in registry order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.checks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
