//! Trie configuration module.

use super::{ConfigResult, Validate};
use crate::data_structures::PatriciaTrieConfig;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Trie construction limits.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrieConfig {
    /// Longest key accepted, in bytes (unset for no limit)
    pub max_key_length: Option<usize>,
}

impl Validate for TrieConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_key_length == Some(0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "trie.max_key_length".to_string(),
                message: "must be greater than 0 when set".to_string(),
            });
        }
        Ok(())
    }
}

impl From<&TrieConfig> for PatriciaTrieConfig {
    fn from(config: &TrieConfig) -> Self {
        Self {
            max_key_length: config.max_key_length,
        }
    }
}
