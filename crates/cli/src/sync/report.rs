// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run summary returned by [`synchronize`](super::synchronize).

use std::fmt;

use ankisync_core::{NoteId, Record};

/// Why a record was left out of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No remote note has the record's key. Likely an upstream inconsistency.
    NoMatch,
    /// Several remote notes share the record's key.
    Ambiguous { matches: Vec<NoteId> },
    /// The record has none of the configured key fields.
    MissingKeyField,
    /// `addNotes` returned null for this record.
    AddFailed,
    /// A request about this record failed remotely.
    Rejected { message: String },
    /// A later row in the same batch updates the same note.
    Superseded { note: NoteId },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoMatch => write!(f, "no matching note found"),
            SkipReason::Ambiguous { matches } => {
                write!(f, "duplicate notes are not supported ({} matches)", matches.len())
            }
            SkipReason::MissingKeyField => write!(f, "no key field"),
            SkipReason::AddFailed => write!(f, "note could not be added"),
            SkipReason::Rejected { message } => write!(f, "rejected: {}", message),
            SkipReason::Superseded { note } => {
                write!(f, "superseded by a later row for note {}", note)
            }
        }
    }
}

/// A record that was neither added nor updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub deck: String,
    /// Human-readable key, e.g. `Front "foo"`.
    pub key: String,
    pub reason: SkipReason,
}

impl Skipped {
    pub(crate) fn new(record: &Record, key: String, reason: SkipReason) -> Self {
        Skipped {
            deck: record.deck_name().to_string(),
            key,
            reason,
        }
    }
}

/// Totals for one `synchronize` run.
///
/// Every input record is counted exactly once across `added`, `updated`
/// and `skipped`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub added: usize,
    pub updated: usize,
    pub skipped: Vec<Skipped>,
    pub tags_removed: usize,
    pub tag_removal_failures: usize,
    pub cards_suspended: usize,
    pub batches: usize,
}

impl SyncReport {
    /// Number of records the run accounted for.
    pub fn total(&self) -> usize {
        self.added + self.updated + self.skipped.len()
    }

    /// Skipped records with the given reason kind.
    pub fn skipped_where(&self, pred: impl Fn(&SkipReason) -> bool) -> usize {
        self.skipped.iter().filter(|s| pred(&s.reason)).count()
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} added, {} updated, {} skipped",
            self.added,
            self.updated,
            self.skipped.len()
        )?;
        if self.tags_removed > 0 {
            write!(f, ", {} tag removals", self.tags_removed)?;
        }
        if self.cards_suspended > 0 {
            write!(f, ", {} cards suspended", self.cards_suspended)?;
        }
        Ok(())
    }
}
