// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use crate::colors;
use crate::help;
use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[derive(Parser)]
#[command(name = "ankisync")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Import a local or remote CSV/TSV file into Anki through AnkiConnect")]
#[command(
    long_about = "Import a local or remote CSV/TSV file into Anki through AnkiConnect.\n\n\
    New rows become notes; rows matching an existing note by key field update its fields and tags."
)]
#[command(help_template = help::template())]
#[command(before_help = help::commands())]
#[command(after_help = help::quickstart())]
#[command(styles = help::styles())]
pub struct Cli {
    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Read configuration from <path> instead of the default locations
    #[arg(long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import notes from a table into Anki
    #[command(after_help = colors::examples("\
Examples:
  ankisync import -p words.tsv -d Spanish -n Basic        Import a local TSV file
  ankisync import -u <url> -d Quotes -n Quote --sync      Import a remote CSV and sync
  ankisync import -p words.csv -n Basic --suspend         Use the file's deck column, suspend cards
  ankisync import -p words.tsv -n Basic -k Word           Match existing notes on the Word field
  ankisync import -p words.tsv -d Spanish -n Basic --dry-run  Validate without contacting Anki

Columns:
  tags: space-separated tags, replaces the note's tags
  deck: per-row deck, falls back to --deck"))]
    Import(ImportArgs),

    /// Check that AnkiConnect is reachable
    #[command(after_help = colors::examples("\
Examples:
  ankisync check                                     Probe the configured endpoint
  ankisync check --endpoint http://127.0.0.1:8765    Probe a specific endpoint"))]
    Check(CheckArgs),

    /// Generate shell completions
    #[command(arg_required_else_help = true)]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// Path of the local CSV/TSV file
    #[arg(short, long, value_name = "path")]
    pub path: Option<PathBuf>,

    /// URL of the remote CSV/TSV file
    #[arg(short, long, value_name = "url")]
    pub url: Option<String>,

    /// Deck to import into (rows with a deck column override it)
    #[arg(short, long, value_parser = non_empty_string)]
    pub deck: Option<String>,

    /// Note type of the imported notes
    #[arg(short, long = "note", value_name = "type", value_parser = non_empty_string)]
    pub note_type: String,

    /// Trigger an AnkiWeb sync after importing
    #[arg(short, long)]
    pub sync: bool,

    /// Suspend every added and updated card
    #[arg(long)]
    pub suspend: bool,

    /// Field used to match existing notes (repeatable, first present wins)
    #[arg(short = 'k', long = "key-field", value_name = "field", value_parser = non_empty_string)]
    pub key_fields: Vec<String>,

    /// Records sent per batch
    #[arg(long, value_name = "n", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub batch_size: Option<usize>,

    /// Column delimiter (default: comma for .csv, tab otherwise)
    #[arg(long, value_name = "char")]
    pub delimiter: Option<String>,

    #[command(flatten)]
    pub endpoint: EndpointArgs,

    /// Parse and validate the input without contacting Anki
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub endpoint: EndpointArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct EndpointArgs {
    /// AnkiConnect URL (default: http://localhost:8765)
    #[arg(long, value_name = "url")]
    pub endpoint: Option<String>,
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
