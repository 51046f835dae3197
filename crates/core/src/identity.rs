// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Identity rules for matching records to existing remote notes.
//!
//! A record is matched on a single key field, chosen from an ordered list of
//! candidate field names. The key value is assumed unique within the deck;
//! composite keys are not supported.

use crate::error::{Error, Result};
use crate::protocol::NoteId;
use crate::record::Record;

/// Default candidate key fields, highest priority first.
pub const DEFAULT_KEY_FIELDS: [&str; 2] = ["Quotation", "Front"];

/// Ordered list of field names used to identify a record remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFields(Vec<String>);

/// The key chosen for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key<'r> {
    pub field: &'r str,
    pub value: &'r str,
}

impl KeyFields {
    /// Creates a key field list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`] if `names` is empty or contains a blank name.
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.is_empty() {
            return Err(Error::InvalidRecord(
                "at least one key field is required".to_string(),
            ));
        }
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(Error::InvalidRecord("key field names cannot be blank".to_string()));
        }
        Ok(KeyFields(names))
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Picks the first candidate the record has with a non-empty value.
    pub fn select<'r>(&self, record: &'r Record) -> Result<Key<'r>> {
        self.0
            .iter()
            .find_map(|name| {
                record
                    .fields()
                    .get_key_value(name)
                    .filter(|(_, value)| !value.is_empty())
                    .map(|(field, value)| Key {
                        field: field.as_str(),
                        value: value.as_str(),
                    })
            })
            .ok_or_else(|| Error::MissingKeyField {
                candidates: self.0.clone(),
            })
    }
}

impl Default for KeyFields {
    fn default() -> Self {
        KeyFields(DEFAULT_KEY_FIELDS.iter().map(|s| s.to_string()).collect())
    }
}

/// Escapes a term for use inside a double-quoted search term.
fn escape(term: &str) -> String {
    term.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Builds the `findNotes` query matching `field == value` within `deck`.
///
/// Quotes and backslashes are escaped so a value cannot end the quoted term early.
pub fn search_query(deck: &str, field: &str, value: &str) -> String {
    format!(
        "deck:\"{}\" \"{}:{}\"",
        escape(deck),
        escape(field),
        escape(value)
    )
}

/// Outcome of looking up a record's key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one note matched.
    Unique(NoteId),
    /// Nothing matched.
    NoMatch,
    /// Several notes share the key; duplicates are unsupported.
    Ambiguous(Vec<NoteId>),
}

impl Resolution {
    pub fn from_matches(matches: Vec<NoteId>) -> Self {
        match matches.as_slice() {
            [] => Resolution::NoMatch,
            [id] => Resolution::Unique(*id),
            _ => Resolution::Ambiguous(matches),
        }
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
