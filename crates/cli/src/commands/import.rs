// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ankisync_core::Record;
use tracing::{debug, info, warn};

use crate::cli::ImportArgs;
use crate::config::Overrides;
use crate::error::{Error, Result};
use crate::fetch;
use crate::sync::{synchronize, AnkiClient, SyncOptions, SyncReport, Transport};
use crate::table::{delimiter_for, parse_delimiter, read_table, TableOptions};

/// Where the input table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Source {
    Path(PathBuf),
    Url(String),
}

impl Source {
    /// Exactly one of `--path` and `--url` must be given.
    pub(crate) fn from_args(path: Option<&Path>, url: Option<&str>) -> Result<Self> {
        match (path, url) {
            (Some(_), Some(_)) => Err(Error::ConflictingInputs),
            (Some(path), None) => Ok(Source::Path(path.to_path_buf())),
            (None, Some(url)) => Ok(Source::Url(url.to_string())),
            (None, None) => Err(Error::NoInput),
        }
    }

    /// Name used to infer the delimiter.
    fn name(&self) -> String {
        match self {
            Source::Path(path) => path.display().to_string(),
            Source::Url(url) => url.clone(),
        }
    }

    fn read(&self, options: &TableOptions<'_>, timeout: Duration) -> Result<Vec<Record>> {
        match self {
            Source::Path(path) => read_table(path, options),
            Source::Url(url) => {
                let file = fetch::download(url, timeout)?;
                let records = read_table(file.path(), options);
                debug!("removing {}", file.path().display());
                records
            }
        }
    }
}

pub fn run(args: ImportArgs, config_path: Option<&Path>) -> Result<()> {
    let source = Source::from_args(args.path.as_deref(), args.url.as_deref())?;
    let config = super::load_config(
        config_path,
        Overrides {
            url: args.endpoint.endpoint.clone(),
            batch_size: args.batch_size,
            key_fields: args.key_fields.clone(),
        },
    )?;

    let delimiter = match args.delimiter.as_deref() {
        Some(value) => parse_delimiter(value)?,
        None => delimiter_for(&source.name()),
    };
    let table = TableOptions {
        deck: args.deck.as_deref(),
        note_type: &args.note_type,
        delimiter,
    };
    let records = source.read(&table, config.timeout())?;
    info!("read {} records from {}", records.len(), source.name());

    if args.dry_run {
        println!("{}", dry_run_summary(&records));
        return Ok(());
    }

    let mut client = super::connect(&config)?;
    let options = config.sync_options(args.suspend)?;
    let report = import_records(&mut client, &records, &options, args.sync)?;
    println!("{report}");
    Ok(())
}

/// Reconcile the records with Anki, then sync to AnkiWeb if asked.
pub(crate) fn import_records<T: Transport>(
    client: &mut AnkiClient<T>,
    records: &[Record],
    options: &SyncOptions,
    sync: bool,
) -> Result<SyncReport> {
    let report = synchronize(client, records, options)?;
    for skipped in &report.skipped {
        warn!("skipped {} in deck {}: {}", skipped.key, skipped.deck, skipped.reason);
    }
    if report.tag_removal_failures > 0 {
        warn!("{} tag removals failed", report.tag_removal_failures);
    }
    debug!("{} requests sent", client.round_trips());

    if sync {
        info!("syncing with AnkiWeb");
        client.sync()?;
    } else {
        info!("Sync was skipped (use --sync to enable)");
    }
    Ok(report)
}

/// Summary printed instead of contacting Anki.
pub(crate) fn dry_run_summary(records: &[Record]) -> String {
    let decks: BTreeSet<&str> = records.iter().map(Record::deck_name).collect();
    format!(
        "{} records in {} decks would be imported (dry run)",
        records.len(),
        decks.len()
    )
}

#[cfg(test)]
#[path = "import_tests.rs"]
mod tests;
