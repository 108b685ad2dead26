//! Interactive session configuration module.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Interactive session settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReplConfig {
    /// Prompt printed before each query
    pub prompt: String,

    /// Start with verbose statistics enabled
    pub verbose: bool,

    /// Maximum number of matches printed per query (0 for all)
    pub max_results: usize,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            verbose: false,
            max_results: 0,
        }
    }
}

impl Validate for ReplConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.prompt.contains('\n') {
            return Err(ConfigError::ValidationError(
                "repl.prompt must not contain a newline".to_string(),
            ));
        }
        Ok(())
    }
}
