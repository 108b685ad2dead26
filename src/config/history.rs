//! Query history configuration module.

use std::path::PathBuf;

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use crate::history::{default_history_path, DEFAULT_MAX_ENTRIES};
use serde::{Deserialize, Serialize};

/// Query history persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HistoryConfig {
    /// Whether history is read at start-up and written on exit
    pub enabled: bool,

    /// Number of most recent queries kept on disk
    pub max_entries: usize,

    /// History file location (unset for the per-user default)
    pub file: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: DEFAULT_MAX_ENTRIES,
            file: None,
        }
    }
}

impl HistoryConfig {
    /// Returns the configured file, or the per-user default location.
    pub fn resolved_path(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(default_history_path)
    }
}

impl Validate for HistoryConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_entries == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "history.max_entries".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
