// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! AnkiConnect client.
//!
//! Provides a typed interface over a [`Transport`]:
//! - Single requests (`invoke`)
//! - Multiplexed requests answered in submission order (`invoke_multi`)
//! - Wrappers for each remote action the engine consumes

use ankisync_core::protocol::{self, decode, NewNote};
use ankisync_core::{Action, CardId, NoteId, NoteInfo, Request, API_VERSION};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::transport::{HttpTransport, Transport, TransportError};

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Transport error. Unreachable endpoints end the run.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The remote store set the error field of a response.
    #[error("{action} failed: {message}")]
    Remote {
        action: &'static str,
        message: String,
    },

    /// The response did not have the expected shape.
    #[error("protocol error: {0}")]
    Protocol(#[from] ankisync_core::Error),

    /// A list response did not line up with the request list.
    #[error("{action} returned {actual} results for {expected} requests")]
    LengthMismatch {
        action: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Result type for client operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Client for the AnkiConnect protocol.
pub struct AnkiClient<T: Transport = HttpTransport> {
    transport: T,
    version: u32,
    round_trips: usize,
}

impl<T: Transport> AnkiClient<T> {
    /// Create a client speaking the default API version.
    pub fn new(transport: T) -> Self {
        Self::with_version(transport, API_VERSION)
    }

    /// Create a client speaking a specific API version.
    pub fn with_version(transport: T, version: u32) -> Self {
        AnkiClient {
            transport,
            version,
            round_trips: 0,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Number of requests sent so far. A multi call counts once.
    pub fn round_trips(&self) -> usize {
        self.round_trips
    }

    /// Send a single action and unwrap its result.
    pub fn invoke(&mut self, action: Action) -> SyncResult<Value> {
        let name = action.name();
        let body = Request::with_version(action, self.version).to_value()?;
        self.round_trips += 1;
        debug!(action = name, "sending request");
        let response = self.transport.post(&body)?;
        protocol::parse_response(response)?.map_err(|failure| SyncError::Remote {
            action: name,
            message: failure.0,
        })
    }

    /// Send several actions in one round trip.
    ///
    /// Each action's outcome is resolved on its own, so one failing
    /// sub-request does not invalidate its siblings. The outer error is
    /// reserved for failures of the call as a whole.
    pub fn invoke_multi(&mut self, actions: Vec<Action>) -> SyncResult<Vec<SyncResult<Value>>> {
        if actions.is_empty() {
            return Ok(Vec::new());
        }
        let names: Vec<&'static str> = actions.iter().map(Action::name).collect();
        let requests = actions
            .into_iter()
            .map(|action| Request::with_version(action, self.version))
            .collect();

        let items: Vec<Value> = decode(self.invoke(Action::Multi { actions: requests })?)?;
        if items.len() != names.len() {
            return Err(SyncError::LengthMismatch {
                action: "multi",
                expected: names.len(),
                actual: items.len(),
            });
        }

        items
            .into_iter()
            .zip(names)
            .map(|(item, name)| -> SyncResult<SyncResult<Value>> {
                Ok(protocol::parse_response(item)?.map_err(|failure| SyncError::Remote {
                    action: name,
                    message: failure.0,
                }))
            })
            .collect()
    }

    /// Return the API version the remote store speaks.
    pub fn version(&mut self) -> SyncResult<u32> {
        typed(self.invoke(Action::Version))
    }

    /// Create a deck if it does not already exist.
    pub fn create_deck(&mut self, deck: &str) -> SyncResult<u64> {
        typed(self.invoke(Action::CreateDeck {
            deck: deck.to_string(),
        }))
    }

    /// Ask whether each note could be added without conflict.
    pub fn can_add_notes(&mut self, notes: Vec<NewNote>) -> SyncResult<Vec<bool>> {
        let expected = notes.len();
        let answers: Vec<bool> = typed(self.invoke(Action::CanAddNotes { notes }))?;
        check_len("canAddNotes", expected, answers.len())?;
        Ok(answers)
    }

    /// Create notes. A `None` entry means that note could not be created.
    pub fn add_notes(&mut self, notes: Vec<NewNote>) -> SyncResult<Vec<Option<NoteId>>> {
        let expected = notes.len();
        let ids: Vec<Option<NoteId>> = typed(self.invoke(Action::AddNotes { notes }))?;
        check_len("addNotes", expected, ids.len())?;
        Ok(ids)
    }

    /// Fetch the current state of notes.
    pub fn notes_info(&mut self, notes: Vec<NoteId>) -> SyncResult<Vec<NoteInfo>> {
        typed(self.invoke(Action::NotesInfo { notes }))
    }

    /// Suspend cards.
    pub fn suspend(&mut self, cards: Vec<CardId>) -> SyncResult<bool> {
        typed(self.invoke(Action::Suspend { cards }))
    }

    /// Trigger a sync of the collection with AnkiWeb.
    pub fn sync(&mut self) -> SyncResult<()> {
        self.invoke(Action::Sync)?;
        Ok(())
    }
}

/// Decode a (sub-)result into a typed value.
pub fn typed<R: DeserializeOwned>(result: SyncResult<Value>) -> SyncResult<R> {
    Ok(decode(result?)?)
}

fn check_len(action: &'static str, expected: usize, actual: usize) -> SyncResult<()> {
    if expected != actual {
        return Err(SyncError::LengthMismatch {
            action,
            expected,
            actual,
        });
    }
    Ok(())
}
