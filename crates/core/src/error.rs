// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for ankisync-core operations.

use thiserror::Error;

/// All possible errors that can occur in ankisync-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("record has no usable key field\n  hint: one of {} must be present and non-empty", candidates.join(", "))]
    MissingKeyField { candidates: Vec<String> },

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for ankisync-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
