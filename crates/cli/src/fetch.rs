// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Download of remote input tables.

use std::io::{Seek, SeekFrom, Write};
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{Error, Result};

/// Download `url` into a temporary file.
///
/// The file is deleted when the returned handle is dropped.
pub fn download(url: &str, timeout: Duration) -> Result<NamedTempFile> {
    let fetch_err = |reason: String| Error::Fetch {
        url: url.to_string(),
        reason,
    };

    info!("downloading {}", url);
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| fetch_err(format!("HTTP client build failed: {e}")))?;

    let mut response = client
        .get(url)
        .header(USER_AGENT, concat!("ankisync/", env!("CARGO_PKG_VERSION")))
        .send()
        .map_err(|e| fetch_err(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(fetch_err(format!("HTTP {}", status.as_u16())));
    }

    let mut file = NamedTempFile::new()?;
    response
        .copy_to(&mut file)
        .map_err(|e| fetch_err(e.to_string()))?;
    file.flush()?;
    file.seek(SeekFrom::Start(0))?;

    info!("wrote download to {}", file.path().display());
    Ok(file)
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
