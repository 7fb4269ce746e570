//! Runtime settings, passed in by the host page as JSON on `init`.
//!
//! Every field has a default so the host only sends what it overrides.

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Key of the single local storage slot.
    pub storage_key: String,
    /// Query parameter carrying the shareable state token.
    pub state_param: String,
    /// Query parameter carrying the optional cell color override.
    pub color_param: String,
    /// Win label whose checking triggers the celebration.
    pub celebrate_label: String,
    /// How long the host should keep the celebration on screen.
    pub celebration_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: "tombola-state".to_string(),
            state_param: "state".to_string(),
            color_param: "color".to_string(),
            celebrate_label: "Tombola".to_string(),
            celebration_ms: 4000,
        }
    }
}

impl Config {
    /// Parse a config from JSON. Blank input yields the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}
