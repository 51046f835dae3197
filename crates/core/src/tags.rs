// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tag delta calculation.
//!
//! Desired tags are always re-added on update (a no-op for tags the note
//! already has), so the only delta worth computing is what to remove.
//! Repeating a run converges on the same tag set regardless of where the
//! note started.

use std::collections::BTreeSet;

/// A set of tags. Order is irrelevant; iteration is sorted for stable output.
pub type TagSet = BTreeSet<String>;

/// Splits a whitespace-separated tag cell into a tag set.
pub fn parse_tags(cell: &str) -> TagSet {
    cell.split_whitespace().map(str::to_string).collect()
}

/// Joins tags the way AnkiConnect's `addTags`/`removeTags` expect them.
pub fn join_tags<'a>(tags: impl IntoIterator<Item = &'a String>) -> String {
    tags.into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the tags present on the remote note but absent from `desired`.
///
/// Anki treats tags case-insensitively, so a remote `Vocab` satisfies a
/// desired `vocab` and is not removed.
pub fn tags_to_remove(desired: &TagSet, current: &[String]) -> TagSet {
    let wanted: BTreeSet<String> = desired.iter().map(|t| t.to_lowercase()).collect();
    current
        .iter()
        .filter(|tag| !wanted.contains(&tag.to_lowercase()))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "tags_tests.rs"]
mod tests;
