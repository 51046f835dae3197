// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run configuration.
//!
//! Settings are read from the first of:
//! - the file given with `--config` or `ANKISYNC_CONFIG`
//! - `ankisync.toml` in the current directory
//! - `ankisync/config.toml` under the user config directory
//!
//! Every field has a default, so no file is required. Command-line flags
//! override whatever the file says.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ankisync_core::{DuplicateScope, KeyFields, NoteOptions, API_VERSION, DEFAULT_KEY_FIELDS};

use crate::error::{Error, Result};
use crate::sync::{SyncOptions, DEFAULT_BATCH_SIZE};

/// Config file looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "ankisync.toml";
const USER_CONFIG_DIR: &str = "ankisync";
const USER_CONFIG_FILE: &str = "config.toml";

/// Default AnkiConnect endpoint.
pub const DEFAULT_URL: &str = "http://localhost:8765";

/// Run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// AnkiConnect endpoint.
    pub url: String,
    /// AnkiConnect API version sent with every request.
    pub version: u32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    pub batch_size: usize,
    /// Candidate key fields, in priority order.
    pub key_fields: Vec<String>,
    pub duplicate_scope: DuplicateScope,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            url: DEFAULT_URL.to_string(),
            version: API_VERSION,
            timeout_secs: 30,
            batch_size: DEFAULT_BATCH_SIZE,
            key_fields: DEFAULT_KEY_FIELDS.iter().map(|s| s.to_string()).collect(),
            duplicate_scope: DuplicateScope::default(),
        }
    }
}

/// Values given on the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub batch_size: Option<usize>,
    pub key_fields: Vec<String>,
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Finds and loads the configuration for this process.
    ///
    /// `--config` wins over `ANKISYNC_CONFIG`. An explicit path must exist;
    /// the implicit locations are optional.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let from_env = crate::env::config_path();
        let explicit = explicit.or(from_env.as_deref());
        let cwd = std::env::current_dir()?;
        let user_dir = dirs::config_dir().map(|d| d.join(USER_CONFIG_DIR));
        Self::resolve(explicit, &cwd, user_dir.as_deref())
    }

    /// Loads the first configuration file found, or the defaults.
    pub fn resolve(explicit: Option<&Path>, cwd: &Path, user_dir: Option<&Path>) -> Result<Self> {
        match config_path(explicit, cwd, user_dir) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            None => Ok(Config::default()),
        }
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(url) = overrides.url {
            self.url = url;
        }
        if let Some(batch_size) = overrides.batch_size {
            self.batch_size = batch_size;
        }
        if !overrides.key_fields.is_empty() {
            self.key_fields = overrides.key_fields;
        }
        self
    }

    /// Checks values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batch_size must be at least 1".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be at least 1".to_string()));
        }
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "invalid url '{}': must start with http:// or https://",
                self.url
            )));
        }
        self.key_fields()?;
        Ok(())
    }

    pub fn key_fields(&self) -> Result<KeyFields> {
        KeyFields::new(self.key_fields.clone())
            .map_err(|e| Error::Config(format!("key_fields: {}", e)))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Engine settings derived from this configuration.
    pub fn sync_options(&self, suspend: bool) -> Result<SyncOptions> {
        Ok(SyncOptions {
            batch_size: self.batch_size,
            suspend,
            key_fields: self.key_fields()?,
            note_options: NoteOptions::reject_duplicates(self.duplicate_scope),
        })
    }
}

fn config_path(explicit: Option<&Path>, cwd: &Path, user_dir: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = cwd.join(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }
    user_dir
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.is_file())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
