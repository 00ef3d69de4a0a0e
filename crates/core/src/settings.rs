//! Board settings, readable from TOML.

use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::holiday::DEFAULT_STORAGE_KEY;

/// Events shown per route when nothing else is configured
pub const DEFAULT_LOOKAHEAD: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// Upcoming events listed per route
    pub lookahead: usize,
    /// Storage slot of the holiday configuration
    pub storage_key: String,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            lookahead: DEFAULT_LOOKAHEAD,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl BoardSettings {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::Validation(e.to_string()))
    }
}
