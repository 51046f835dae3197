// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ankisync-core: domain logic for reconciling flashcard records with AnkiConnect.
//!
//! This crate holds the I/O-free half of the engine: the record model, the
//! AnkiConnect wire types, identity rules for matching records to existing
//! notes, and the tag delta calculation. The `ankisync` crate drives these
//! through a transport.

pub mod error;
pub mod identity;
pub mod protocol;
pub mod record;
pub mod tags;

pub use error::{Error, Result};
pub use identity::{search_query, Key, KeyFields, Resolution, DEFAULT_KEY_FIELDS};
pub use protocol::{
    Action, CardId, NewNote, NoteFields, NoteId, NoteInfo, RemoteFailure, Request, API_VERSION,
};
pub use record::{DuplicateScope, NoteOptions, Record};
pub use tags::{join_tags, parse_tags, tags_to_remove, TagSet};
