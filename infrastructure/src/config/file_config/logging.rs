//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
///
/// # Example
///
/// ```toml
/// [logging]
/// file = "~/.local/state/huddle/huddle.log"
/// exchange_log = "~/.local/state/huddle/exchanges.jsonl"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Also write diagnostic logs to this file (ANSI disabled)
    pub file: Option<String>,
    /// Write one JSON line per routing event to this file
    pub exchange_log: Option<String>,
}

impl FileLoggingConfig {
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file.as_deref().filter(|p| !p.is_empty()).map(expand_home)
    }

    pub fn exchange_log_path(&self) -> Option<PathBuf> {
        self.exchange_log
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(expand_home)
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
