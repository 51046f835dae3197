// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ankisync - import CSV/TSV tables into Anki through AnkiConnect.
//!
//! This crate provides the functionality behind the `ankisync` CLI. Rows of
//! an input table become notes: new rows are added, rows whose key field
//! matches an existing note update that note's fields and tags.
//!
//! # Main Components
//!
//! - [`sync`] - the reconciliation engine ([`synchronize`](sync::synchronize))
//!   and the AnkiConnect client it drives
//! - [`table`] - delimited input parsing into [`Record`](ankisync_core::Record)s
//! - [`Config`] - run configuration (endpoint, batch size, key fields)
//! - [`Error`] - Error types for all operations
//!
//! # Library use
//!
//! ```rust,ignore
//! use ankisync::sync::{synchronize, AnkiClient, HttpTransport, SyncOptions};
//!
//! let transport = HttpTransport::new("http://localhost:8765", Duration::from_secs(30))?;
//! let mut client = AnkiClient::new(transport);
//! let report = synchronize(&mut client, &records, &SyncOptions::default())?;
//! println!("{report}");
//! ```

mod cli;
pub mod colors;
mod commands;
mod env;
mod fetch;
pub mod help;

pub mod config;
pub mod error;
pub mod sync;
pub mod table;

pub use cli::{CheckArgs, Cli, Command, EndpointArgs, ImportArgs};
pub use config::Config;
pub use error::{Error, Result};

use clap::CommandFactory;
use clap_complete::generate;

/// Execute a parsed command line. This is the main entry point for library
/// users and provides a testable way to run commands without process execution.
pub fn run(cli: Cli) -> Result<()> {
    let config = cli.config.as_deref();
    match cli.command {
        Command::Import(args) => commands::import::run(args, config),
        Command::Check(args) => commands::check::run(args, config),
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "ankisync", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
