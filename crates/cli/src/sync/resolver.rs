// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Identity resolution: deciding whether a record is new and, if not,
//! which remote note it maps to.

use ankisync_core::{search_query, Action, Key, KeyFields, NoteId, NoteOptions, Record, Resolution};
use tracing::warn;

use super::client::{typed, AnkiClient, SyncResult};
use super::report::{SkipReason, Skipped};
use super::transport::Transport;

/// A record paired with the remote note it maps to, once known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingNote<'r> {
    pub record: &'r Record,
    pub id: Option<NoteId>,
}

impl<'r> PendingNote<'r> {
    pub fn new(record: &'r Record) -> Self {
        PendingNote { record, id: None }
    }
}

/// A batch split by the remote store's `canAddNotes` answer.
#[derive(Debug, Default)]
pub struct Classification<'r> {
    pub additions: Vec<PendingNote<'r>>,
    pub candidates: Vec<PendingNote<'r>>,
}

/// Update candidates after lookup.
#[derive(Debug, Default)]
pub struct Resolved<'r> {
    /// Candidates with exactly one match; `id` is always set.
    pub notes: Vec<PendingNote<'r>>,
    pub skipped: Vec<Skipped>,
}

/// Resolves records to remote identities.
pub struct IdentityResolver<'k> {
    keys: &'k KeyFields,
    options: NoteOptions,
}

impl<'k> IdentityResolver<'k> {
    pub fn new(keys: &'k KeyFields, options: NoteOptions) -> Self {
        IdentityResolver { keys, options }
    }

    pub fn options(&self) -> NoteOptions {
        self.options
    }

    /// Human-readable key of a record for reports and logs.
    pub fn describe(&self, record: &Record) -> String {
        match self.keys.select(record) {
            Ok(key) => describe_key(&key),
            Err(_) => "(no key field)".to_string(),
        }
    }

    /// Classify a batch with one `canAddNotes` query.
    ///
    /// This is a guess, not a guarantee: a record classified as addable can
    /// still fail to add, and a candidate can still fail to resolve.
    pub fn classify<'r, T: Transport>(
        &self,
        client: &mut AnkiClient<T>,
        batch: &'r [Record],
    ) -> SyncResult<Classification<'r>> {
        let mut classification = Classification::default();
        if batch.is_empty() {
            return Ok(classification);
        }

        let notes = batch
            .iter()
            .map(|record| record.to_new_note(self.options))
            .collect();
        let answers = client.can_add_notes(notes)?;

        for (record, can_add) in batch.iter().zip(answers) {
            let pending = PendingNote::new(record);
            if can_add {
                classification.additions.push(pending);
            } else {
                classification.candidates.push(pending);
            }
        }
        Ok(classification)
    }

    /// Look up every candidate in one multiplexed `findNotes` call.
    ///
    /// Candidates with no match or several matches are skipped with a
    /// warning; the run continues.
    pub fn resolve<'r, T: Transport>(
        &self,
        client: &mut AnkiClient<T>,
        candidates: Vec<PendingNote<'r>>,
    ) -> SyncResult<Resolved<'r>> {
        let mut resolved = Resolved::default();
        let mut lookups = Vec::with_capacity(candidates.len());
        let mut actions = Vec::with_capacity(candidates.len());

        for pending in candidates {
            match self.keys.select(pending.record) {
                Ok(key) => {
                    actions.push(Action::FindNotes {
                        query: search_query(pending.record.deck_name(), key.field, key.value),
                    });
                    lookups.push((pending, describe_key(&key)));
                }
                Err(_) => {
                    warn!(
                        deck = pending.record.deck_name(),
                        "note has none of the key fields {:?}, skipping",
                        self.keys.names()
                    );
                    resolved.skipped.push(Skipped::new(
                        pending.record,
                        "(no key field)".to_string(),
                        SkipReason::MissingKeyField,
                    ));
                }
            }
        }

        let results = client.invoke_multi(actions)?;
        for ((pending, key), result) in lookups.into_iter().zip(results) {
            let matches: Vec<NoteId> = match typed(result) {
                Ok(matches) => matches,
                Err(e) => {
                    warn!("lookup failed for note with {}, skipping: {}", key, e);
                    resolved.skipped.push(Skipped::new(
                        pending.record,
                        key,
                        SkipReason::Rejected {
                            message: e.to_string(),
                        },
                    ));
                    continue;
                }
            };

            match Resolution::from_matches(matches) {
                Resolution::Unique(id) => resolved.notes.push(PendingNote {
                    id: Some(id),
                    ..pending
                }),
                Resolution::NoMatch => {
                    warn!(
                        "did not find any results for note with {}, skipping; \
                         this usually means the input and the collection disagree",
                        key
                    );
                    resolved
                        .skipped
                        .push(Skipped::new(pending.record, key, SkipReason::NoMatch));
                }
                Resolution::Ambiguous(matches) => {
                    warn!(
                        "duplicate notes are not supported, skipping note with {} ({} matches)",
                        key,
                        matches.len()
                    );
                    resolved.skipped.push(Skipped::new(
                        pending.record,
                        key,
                        SkipReason::Ambiguous { matches },
                    ));
                }
            }
        }
        Ok(resolved)
    }
}

fn describe_key(key: &Key<'_>) -> String {
    format!("{} \"{}\"", key.field, key.value)
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
