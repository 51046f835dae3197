// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use tracing::debug;

use crate::cli::CheckArgs;
use crate::config::Overrides;
use crate::error::Result;
use crate::sync::{AnkiClient, Transport};

pub fn run(args: CheckArgs, config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(
        config_path,
        Overrides {
            url: args.endpoint.endpoint,
            ..Overrides::default()
        },
    )?;
    let mut client = super::connect(&config)?;
    println!("{}", probe(&mut client, &config.url)?);
    Ok(())
}

/// Ask the endpoint for its API version and describe the answer.
pub(crate) fn probe<T: Transport>(client: &mut AnkiClient<T>, url: &str) -> Result<String> {
    debug!(url, "probing endpoint");
    let version = client.version()?;
    Ok(format!("AnkiConnect API version {version} at {url}"))
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
