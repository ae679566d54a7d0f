//! Layout engine configuration.
//!
//! Read from `<data-dir>/config.json`. Every field has a default, so a
//! partial document (or `{}`) is valid.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::model::DEFAULT_STORAGE_KEY;
use crate::scheduler::DEFAULT_THROTTLE_INTERVAL;

/// File name of the config document inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Throttle interval must be at least 1 ms")]
    ZeroThrottle,
}

/// Settings for the layout engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Minimum spacing between directly applied updates, in milliseconds.
    #[serde(default = "default_throttle_interval_ms")]
    pub throttle_interval_ms: u64,

    /// Key the panel sizes are stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Store document name, relative to the data directory.
    #[serde(default = "default_store_file")]
    pub store_file: String,
}

fn default_throttle_interval_ms() -> u64 {
    u64::try_from(DEFAULT_THROTTLE_INTERVAL.as_millis())
        .unwrap_or(16)
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.into()
}

fn default_store_file() -> String {
    "store.json".into()
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            throttle_interval_ms: default_throttle_interval_ms(),
            storage_key: default_storage_key(),
            store_file: default_store_file(),
        }
    }
}

impl LayoutConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        if config.throttle_interval_ms == 0 {
            return Err(ConfigError::ZeroThrottle);
        }
        Ok(config)
    }

    /// Load `<data_dir>/config.json`, falling back to defaults.
    ///
    /// A missing file is normal; an unreadable or invalid one is logged.
    pub fn load_or_default(data_dir: &Path) -> Self {
        let path = data_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Ignoring invalid config, using defaults");
            Self::default()
        })
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_interval_ms)
    }

    /// Full path of the store document.
    pub fn store_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.store_file)
    }
}
