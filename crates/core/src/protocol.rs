// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! AnkiConnect protocol messages.
//!
//! Every request is a JSON object `{"action": ..., "version": 6, "params": {...}}`
//! and every response is `{"result": ..., "error": ...}`. Responses are mapped
//! to `Result<Value, RemoteFailure>` here so that callers never look at the
//! raw envelope.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::record::NoteOptions;

/// AnkiConnect API version spoken by this crate.
pub const API_VERSION: u32 = 6;

/// Identifier the remote store assigns to a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub u64);

/// Identifier the remote store assigns to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A note as submitted to `canAddNotes` and `addNotes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub deck_name: String,
    pub model_name: String,
    pub fields: BTreeMap<String, String>,
    pub tags: Vec<String>,
    pub options: NoteOptions,
}

/// The `note` parameter of `updateNoteFields`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteFields {
    pub id: NoteId,
    pub fields: BTreeMap<String, String>,
}

/// The remote store's view of a note, as returned by `notesInfo`.
///
/// Only the parts the engine needs are decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteInfo {
    pub note_id: NoteId,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cards: Vec<CardId>,
}

/// Remote actions consumed by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "params", rename_all = "camelCase")]
pub enum Action {
    Version,
    CreateDeck { deck: String },
    CanAddNotes { notes: Vec<NewNote> },
    AddNotes { notes: Vec<NewNote> },
    FindNotes { query: String },
    UpdateNoteFields { note: NoteFields },
    NotesInfo { notes: Vec<NoteId> },
    AddTags { notes: Vec<NoteId>, tags: String },
    RemoveTags { notes: Vec<NoteId>, tags: String },
    Suspend { cards: Vec<CardId> },
    Sync,
    Multi { actions: Vec<Request> },
}

impl Action {
    /// The wire name of the action.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Version => "version",
            Action::CreateDeck { .. } => "createDeck",
            Action::CanAddNotes { .. } => "canAddNotes",
            Action::AddNotes { .. } => "addNotes",
            Action::FindNotes { .. } => "findNotes",
            Action::UpdateNoteFields { .. } => "updateNoteFields",
            Action::NotesInfo { .. } => "notesInfo",
            Action::AddTags { .. } => "addTags",
            Action::RemoveTags { .. } => "removeTags",
            Action::Suspend { .. } => "suspend",
            Action::Sync => "sync",
            Action::Multi { .. } => "multi",
        }
    }
}

/// A versioned request envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub action: Action,
    pub version: u32,
}

impl Request {
    pub fn new(action: Action) -> Self {
        Request {
            action,
            version: API_VERSION,
        }
    }

    pub fn with_version(action: Action, version: u32) -> Self {
        Request { action, version }
    }

    /// Serializes the request to a JSON value.
    pub fn to_value(&self) -> Result<Value> {
        let mut body = serde_json::to_value(&self.action)?;
        match body {
            Value::Object(ref mut map) => {
                map.insert("version".to_string(), Value::from(self.version));
            }
            _ => {
                return Err(Error::MalformedResponse(format!(
                    "action {} did not serialize to an object",
                    self.action.name()
                )))
            }
        }
        Ok(body)
    }
}

impl Serialize for Request {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

/// An error reported by the remote store in a response's `error` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFailure(pub String);

impl fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unwraps a response envelope.
///
/// The outer `Result` fails when the envelope itself is malformed; the inner
/// one carries the remote store's verdict for this request.
pub fn parse_response(response: Value) -> Result<std::result::Result<Value, RemoteFailure>> {
    let Value::Object(mut map) = response else {
        return Err(Error::MalformedResponse(
            "response is not a JSON object".to_string(),
        ));
    };
    if map.len() != 2 {
        return Err(Error::MalformedResponse(format!(
            "response has an unexpected number of fields ({})",
            map.len()
        )));
    }
    let error = map
        .remove("error")
        .ok_or_else(|| Error::MalformedResponse("response is missing the error field".into()))?;
    let result = map
        .remove("result")
        .ok_or_else(|| Error::MalformedResponse("response is missing the result field".into()))?;

    match error {
        Value::Null => Ok(Ok(result)),
        Value::String(message) => Ok(Err(RemoteFailure(message))),
        other => Ok(Err(RemoteFailure(other.to_string()))),
    }
}

/// Decodes a successful result into a typed value.
pub fn decode<T: DeserializeOwned>(result: Value) -> Result<T> {
    Ok(serde_json::from_value(result)?)
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
