//! Thread composition policy.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cache::CacheConfig;
use crate::DEFAULT_POLICY_VERSION;

/// Error loading a policy.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// Policy JSON could not be parsed.
    #[error("Invalid policy JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Policy file could not be read.
    #[error("Failed to read policy file: {0}")]
    Io(#[from] std::io::Error),
}

/// Controls how threads are composed for display.
///
/// ## Parameters
///
/// - `skip_hidden`: drop hidden replies from the flattened list (counts
///   still include them)
/// - `cache`: memoization of counts and flattened lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadPolicy {
    /// Policy version identifier.
    pub version: String,
    /// Whether hidden replies are left out of expanded threads.
    pub skip_hidden: bool,
    /// Memoization settings.
    pub cache: CacheConfig,
}

impl ThreadPolicy {
    /// Get the policy ID.
    pub fn policy_id(&self) -> &str {
        &self.version
    }

    /// Parse a policy from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a policy JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Policy with memoization turned off.
    pub fn uncached() -> Self {
        Self {
            cache: CacheConfig::disabled(),
            ..Self::default()
        }
    }
}

impl Default for ThreadPolicy {
    fn default() -> Self {
        Self {
            version: DEFAULT_POLICY_VERSION.to_string(),
            skip_hidden: true,
            cache: CacheConfig::default(),
        }
    }
}
