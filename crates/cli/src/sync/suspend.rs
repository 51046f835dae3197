// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Suspension of every card touched by a run.

use ankisync_core::{CardId, NoteInfo};
use tracing::info;

use super::client::{AnkiClient, SyncResult};
use super::coordinator::Accumulator;
use super::transport::Transport;

/// Suspend the cards of every added and updated note with one `suspend` call.
///
/// Card ids of added notes are fetched with one `notesInfo` call; updated
/// notes already carry theirs in their snapshot. Nothing is sent when there
/// are no cards. Returns the number of cards suspended.
pub fn suspend_all<T: Transport>(
    client: &mut AnkiClient<T>,
    accumulator: &Accumulator,
) -> SyncResult<usize> {
    let added = if accumulator.added.is_empty() {
        Vec::new()
    } else {
        info!("fetching card info for {} new notes", accumulator.added.len());
        client.notes_info(accumulator.added.clone())?
    };

    let cards = collect_cards(&added, &accumulator.updated);
    if cards.is_empty() {
        return Ok(0);
    }

    let count = cards.len();
    info!("suspending {} cards", count);
    client.suspend(cards)?;
    Ok(count)
}

/// Card ids of added notes followed by those of updated notes.
///
/// Duplicates are kept; suspending a card twice is harmless.
pub fn collect_cards(added: &[NoteInfo], updated: &[NoteInfo]) -> Vec<CardId> {
    added
        .iter()
        .chain(updated)
        .flat_map(|info| info.cards.iter().copied())
        .collect()
}

#[cfg(test)]
#[path = "suspend_tests.rs"]
mod tests;
