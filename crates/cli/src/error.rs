// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::sync::SyncError;

/// All possible errors that can occur in the ankisync CLI.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Core(#[from] ankisync_core::Error),

    #[error("only one of --path and --url can be supplied")]
    ConflictingInputs,

    #[error("you must specify either --path or --url")]
    NoInput,

    #[error("line {line}: no deck for this row\n  hint: pass --deck or fill in the row's deck column")]
    MissingDeck { line: usize },

    #[error("line {line}: {reason}")]
    ParseLine { line: usize, reason: String },

    #[error("invalid delimiter '{0}'\n  hint: the delimiter must be a single character, e.g. ',' or '\\t'")]
    InvalidDelimiter(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("failed to download {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("cannot read {path}: {source}")]
    ReadInput {
        path: String,
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for ankisync operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
