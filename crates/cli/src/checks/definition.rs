// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! YAML check definitions.

use serde::Deserialize;

use super::entry::EntrySpec;
use super::select::ALL;
use crate::check::Check;
use crate::error::{Error, Result};

/// Unparsed definition as produced by a check source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDefinition {
    /// Where the definition came from (file path or builtin name).
    pub source_name: String,
    pub content: String,
}

impl RawDefinition {
    pub fn new(source_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            content: content.into(),
        }
    }
}

/// Deserialized form of a definition file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CheckDefinition {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    description: String,
    entry: Option<EntrySpec>,
}

/// Parse one raw definition into an executable check.
pub fn parse(raw: &RawDefinition) -> Result<Check> {
    let malformed = |message: String| Error::MalformedCheckDefinition {
        source_name: raw.source_name.clone(),
        message,
    };

    let def: CheckDefinition =
        serde_yaml::from_str(&raw.content).map_err(|e| malformed(e.to_string()))?;

    let id = def.id.trim();
    for (field, value) in [
        ("id", id),
        ("name", def.name.as_str()),
        ("message", def.message.as_str()),
    ] {
        if value.trim().is_empty() {
            return Err(malformed(format!("missing required field '{field}'")));
        }
    }
    if id == ALL {
        return Err(malformed(format!("'{ALL}' is reserved")));
    }
    if id.contains(|c: char| c.is_whitespace() || c == ',') {
        return Err(malformed(format!("invalid id '{id}'")));
    }

    let entry = def
        .entry
        .ok_or_else(|| malformed("missing required field 'entry'".into()))?
        .compile()
        .map_err(|e| malformed(format!("invalid entry: {e}")))?;

    Ok(Check::new(id, def.name.trim(), entry)
        .with_message(def.message.trim())
        .with_description(def.description.trim()))
}

#[cfg(test)]
#[path = "definition_tests.rs"]
mod tests;
