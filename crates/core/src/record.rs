// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Normalized input records.
//!
//! A [`Record`] is one row of the input table after column mapping. It is
//! created once per row and never mutated by the engine; the engine only
//! reads it to build requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::protocol::NewNote;
use crate::tags::TagSet;

/// A normalized unit of input: one note to create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    deck_name: String,
    note_type: String,
    fields: BTreeMap<String, String>,
    tags: TagSet,
}

impl Record {
    /// Creates a record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`] if the deck name or note type is empty.
    pub fn new(
        deck_name: impl Into<String>,
        note_type: impl Into<String>,
        fields: BTreeMap<String, String>,
        tags: TagSet,
    ) -> Result<Self> {
        let deck_name = deck_name.into();
        let note_type = note_type.into();
        if deck_name.trim().is_empty() {
            return Err(Error::InvalidRecord("deck name cannot be empty".to_string()));
        }
        if note_type.trim().is_empty() {
            return Err(Error::InvalidRecord("note type cannot be empty".to_string()));
        }
        Ok(Record {
            deck_name,
            note_type,
            fields,
            tags,
        })
    }

    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    pub fn note_type(&self) -> &str {
        &self.note_type
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Returns the value of a field, if the record has it.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The desired tag set for the remote note.
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Builds the note payload used by `canAddNotes` and `addNotes`.
    pub fn to_new_note(&self, options: NoteOptions) -> NewNote {
        NewNote {
            deck_name: self.deck_name.clone(),
            model_name: self.note_type.clone(),
            fields: self.fields.clone(),
            tags: self.tags.iter().cloned().collect(),
            options,
        }
    }
}

/// Scope within which the remote store checks for duplicate notes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateScope {
    #[default]
    Deck,
    Collection,
}

/// Per-note options sent with additions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteOptions {
    pub allow_duplicate: bool,
    pub duplicate_scope: DuplicateScope,
}

impl NoteOptions {
    /// Options that make the store reject duplicates within `scope`.
    ///
    /// Rejection is what lets `canAddNotes` classify records that already
    /// exist as update candidates.
    pub fn reject_duplicates(scope: DuplicateScope) -> Self {
        NoteOptions {
            allow_duplicate: false,
            duplicate_scope: scope,
        }
    }
}

impl Default for NoteOptions {
    fn default() -> Self {
        NoteOptions::reject_duplicates(DuplicateScope::default())
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
