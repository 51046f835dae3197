// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod check;
pub mod import;

use std::path::Path;

use crate::config::{Config, Overrides};
use crate::error::Result;
use crate::sync::{AnkiClient, HttpTransport, SyncError};

/// Load the configuration for this run and apply command-line overrides.
pub fn load_config(explicit: Option<&Path>, overrides: Overrides) -> Result<Config> {
    let config = Config::discover(explicit)?.with_overrides(overrides);
    config.validate()?;
    Ok(config)
}

/// Build a client for the configured endpoint.
pub fn connect(config: &Config) -> Result<AnkiClient> {
    let transport = HttpTransport::new(config.url.clone(), config.timeout()).map_err(SyncError::from)?;
    Ok(AnkiClient::with_version(transport, config.version))
}
