// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Batch coordinator.
//!
//! Records are processed in fixed-size batches, strictly one after another:
//! a batch's `canAddNotes` answers must see the notes created by earlier
//! batches. Within a batch the stages run in a fixed order:
//!
//! ```text
//! Classified ─► Added ─► LookedUp ─► Resolved ─► TagReconciled ─► Done
//! ```
//!
//! Nothing is retried and nothing is rolled back. A partially applied batch
//! is an accepted outcome; re-running the whole import converges.

use std::collections::HashSet;
use std::fmt;

use ankisync_core::{
    join_tags, tags_to_remove, Action, KeyFields, NoteFields, NoteId, NoteInfo, NoteOptions,
    Record,
};
use tracing::{debug, info, warn};

use super::client::{typed, AnkiClient, SyncError, SyncResult};
use super::report::{SkipReason, Skipped, SyncReport};
use super::resolver::{IdentityResolver, PendingNote};
use super::suspend;
use super::transport::Transport;

/// Default number of records per batch.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Run-level settings for [`synchronize`].
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub batch_size: usize,
    /// Suspend every added or updated card at the end of the run.
    pub suspend: bool,
    pub key_fields: KeyFields,
    pub note_options: NoteOptions,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions {
            batch_size: DEFAULT_BATCH_SIZE,
            suspend: false,
            key_fields: KeyFields::default(),
            note_options: NoteOptions::default(),
        }
    }
}

/// Pipeline stage of the batch being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStage {
    Classified,
    Added,
    LookedUp,
    Resolved,
    TagReconciled,
    Done,
}

impl fmt::Display for BatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BatchStage::Classified => "classified",
            BatchStage::Added => "added",
            BatchStage::LookedUp => "looked-up",
            BatchStage::Resolved => "resolved",
            BatchStage::TagReconciled => "tag-reconciled",
            BatchStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Identifiers collected across batches for the suspension stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulator {
    /// Notes created by `addNotes` (failed additions excluded).
    pub added: Vec<NoteId>,
    /// Snapshots of updated notes, fetched right after their update.
    pub updated: Vec<NoteInfo>,
}

impl Accumulator {
    fn absorb(&mut self, outcome: BatchOutcome) {
        self.added.extend(outcome.added);
        self.updated.extend(outcome.updated);
    }
}

/// What one batch contributed.
#[derive(Debug, Default)]
struct BatchOutcome {
    added: Vec<NoteId>,
    updated: Vec<NoteInfo>,
}

/// Reconcile `records` with the remote store.
///
/// Ensures every referenced deck exists, runs the batches, and optionally
/// suspends every touched card. Returns a report of what happened to each
/// record.
///
/// # Errors
///
/// Fails on transport errors (the endpoint is unreachable) and on remote
/// errors of whole requests. Per-record failures are reported in
/// [`SyncReport::skipped`] instead.
pub fn synchronize<T: Transport>(
    client: &mut AnkiClient<T>,
    records: &[Record],
    options: &SyncOptions,
) -> SyncResult<SyncReport> {
    let mut report = SyncReport::default();
    let mut accumulator = Accumulator::default();

    ensure_decks(client, records)?;

    let resolver = IdentityResolver::new(&options.key_fields, options.note_options);
    let mut coordinator = BatchCoordinator {
        client: &mut *client,
        resolver,
    };

    let batch_size = options.batch_size.max(1);
    let batch_count = records.len().div_ceil(batch_size);
    for (index, batch) in records.chunks(batch_size).enumerate() {
        info!(
            "processing batch {}/{} ({} notes)",
            index + 1,
            batch_count,
            batch.len()
        );
        let outcome = coordinator.run_batch(batch, &mut report)?;
        accumulator.absorb(outcome);
        report.batches += 1;
    }

    if options.suspend {
        report.cards_suspended = suspend::suspend_all(client, &accumulator)?;
    }

    Ok(report)
}

/// Issue one `createDeck` per distinct deck, in order of first appearance.
fn ensure_decks<T: Transport>(client: &mut AnkiClient<T>, records: &[Record]) -> SyncResult<()> {
    let mut seen = HashSet::new();
    for record in records {
        if seen.insert(record.deck_name()) {
            debug!(deck = record.deck_name(), "ensuring deck exists");
            client.create_deck(record.deck_name())?;
        }
    }
    Ok(())
}

/// Drives the per-batch pipeline.
struct BatchCoordinator<'c, 'k, T: Transport> {
    client: &'c mut AnkiClient<T>,
    resolver: IdentityResolver<'k>,
}

/// Positions of one record's sub-requests in the update call.
struct UpdatePlan<'r> {
    pending: PendingNote<'r>,
    id: NoteId,
    adds_tags: bool,
}

impl<'c, 'k, T: Transport> BatchCoordinator<'c, 'k, T> {
    fn run_batch(&mut self, batch: &[Record], report: &mut SyncReport) -> SyncResult<BatchOutcome> {
        let mut outcome = BatchOutcome::default();

        let classification = self.resolver.classify(self.client, batch)?;
        self.stage(BatchStage::Classified);

        self.add(&classification.additions, report, &mut outcome)?;
        self.stage(BatchStage::Added);

        let resolved = self
            .resolver
            .resolve(self.client, classification.candidates)?;
        self.stage(BatchStage::LookedUp);
        report.skipped.extend(resolved.skipped);

        let updated = self.update(resolved.notes, report)?;
        self.stage(BatchStage::Resolved);

        self.reconcile_tags(&updated, report)?;
        self.stage(BatchStage::TagReconciled);

        report.updated += updated.len();
        outcome
            .updated
            .extend(updated.into_iter().map(|(_, info)| info));
        self.stage(BatchStage::Done);
        Ok(outcome)
    }

    fn stage(&self, stage: BatchStage) {
        debug!(%stage, "batch stage complete");
    }

    /// Submit all additions as one `addNotes` request.
    fn add(
        &mut self,
        additions: &[PendingNote<'_>],
        report: &mut SyncReport,
        outcome: &mut BatchOutcome,
    ) -> SyncResult<()> {
        if additions.is_empty() {
            return Ok(());
        }
        info!("adding {} new notes", additions.len());

        let notes = additions
            .iter()
            .map(|p| p.record.to_new_note(self.resolver.options()))
            .collect();
        let ids = self.client.add_notes(notes)?;

        for (pending, id) in additions.iter().zip(ids) {
            match id {
                Some(id) => {
                    outcome.added.push(id);
                    report.added += 1;
                }
                None => {
                    let key = self.resolver.describe(pending.record);
                    warn!("failed to add note with {}, skipping", key);
                    report
                        .skipped
                        .push(Skipped::new(pending.record, key, SkipReason::AddFailed));
                }
            }
        }
        Ok(())
    }

    /// Update fields, fetch snapshots and add desired tags in one multi call.
    ///
    /// Returns the records whose update and snapshot both succeeded.
    fn update<'r>(
        &mut self,
        resolved: Vec<PendingNote<'r>>,
        report: &mut SyncReport,
    ) -> SyncResult<Vec<(PendingNote<'r>, NoteInfo)>> {
        let mut plans: Vec<UpdatePlan<'r>> = Vec::with_capacity(resolved.len());
        for pending in resolved {
            let Some(id) = pending.id else {
                let key = self.resolver.describe(pending.record);
                report.skipped.push(Skipped::new(
                    pending.record,
                    key,
                    SkipReason::Rejected {
                        message: "note id was not resolved".to_string(),
                    },
                ));
                continue;
            };
            // A later row for the same note wins, as it would in its own batch.
            if let Some(pos) = plans.iter().position(|plan| plan.id == id) {
                let earlier = plans.remove(pos);
                let key = self.resolver.describe(earlier.pending.record);
                warn!("note with {} appears again later in the batch, skipping earlier row", key);
                report.skipped.push(Skipped::new(
                    earlier.pending.record,
                    key,
                    SkipReason::Superseded { note: id },
                ));
            }
            plans.push(UpdatePlan {
                pending,
                id,
                adds_tags: !pending.record.tags().is_empty(),
            });
        }

        let mut actions = Vec::with_capacity(plans.len() * 3);
        for plan in &plans {
            let record = plan.pending.record;
            actions.push(Action::UpdateNoteFields {
                note: NoteFields {
                    id: plan.id,
                    fields: record.fields().clone(),
                },
            });
            actions.push(Action::NotesInfo {
                notes: vec![plan.id],
            });
            if plan.adds_tags {
                actions.push(Action::AddTags {
                    notes: vec![plan.id],
                    tags: join_tags(record.tags()),
                });
            }
        }

        if plans.is_empty() {
            return Ok(Vec::new());
        }
        info!("updating {} existing notes", plans.len());

        let expected = actions.len();
        let results = self.client.invoke_multi(actions)?;
        let actual = results.len();
        let mut results = results.into_iter();
        let mut updated = Vec::with_capacity(plans.len());

        for plan in plans {
            let (Some(update), Some(info)) = (results.next(), results.next()) else {
                return Err(SyncError::LengthMismatch {
                    action: "multi",
                    expected,
                    actual,
                });
            };
            let tags = if plan.adds_tags { results.next() } else { None };

            let snapshot = update
                .and_then(|_| typed::<Vec<NoteInfo>>(info))
                .and_then(|infos| single_snapshot(plan.id, infos))
                .and_then(|info| match tags {
                    Some(result) => result.map(|_| info),
                    None => Ok(info),
                });

            match snapshot {
                Ok(info) => updated.push((plan.pending, info)),
                Err(e) => {
                    let key = self.resolver.describe(plan.pending.record);
                    warn!("failed to update note with {}, skipping: {}", key, e);
                    report.skipped.push(Skipped::new(
                        plan.pending.record,
                        key,
                        SkipReason::Rejected {
                            message: e.to_string(),
                        },
                    ));
                }
            }
        }
        Ok(updated)
    }

    /// Remove tags the remote notes carry but the records do not want.
    fn reconcile_tags(
        &mut self,
        updated: &[(PendingNote<'_>, NoteInfo)],
        report: &mut SyncReport,
    ) -> SyncResult<()> {
        let actions: Vec<Action> = updated
            .iter()
            .filter_map(|(pending, info)| {
                let stale = tags_to_remove(pending.record.tags(), &info.tags);
                if stale.is_empty() {
                    return None;
                }
                Some(Action::RemoveTags {
                    notes: vec![info.note_id],
                    tags: join_tags(&stale),
                })
            })
            .collect();

        if actions.is_empty() {
            return Ok(());
        }
        info!("removing outdated tags from {} notes", actions.len());

        for result in self.client.invoke_multi(actions)? {
            match result {
                Ok(_) => report.tags_removed += 1,
                Err(e) => {
                    warn!("failed to remove outdated tags: {}", e);
                    report.tag_removal_failures += 1;
                }
            }
        }
        Ok(())
    }
}

fn single_snapshot(id: NoteId, infos: Vec<NoteInfo>) -> SyncResult<NoteInfo> {
    let count = infos.len();
    let mut infos = infos.into_iter();
    match (infos.next(), count) {
        (Some(info), 1) if info.note_id == id => Ok(info),
        _ => Err(ankisync_core::Error::MalformedResponse(format!(
            "notesInfo for note {} returned {} notes",
            id, count
        ))
        .into()),
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
