//! Word list loader configuration module.

use super::{ConfigResult, Validate};
use serde::{Deserialize, Serialize};

/// Word list loading options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoaderConfig {
    /// Skip lines whose trimmed form starts with `#`
    pub skip_comments: bool,

    /// Emit a progress event every this many inserted words (0 disables)
    pub log_every: usize,
}

impl Validate for LoaderConfig {
    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }
}
