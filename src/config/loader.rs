use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/slotbridge/config.toml` on Unix/macOS, or the
    /// platform equivalent via `dirs::config_dir()`. Falls back to the
    /// current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("slotbridge").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - No restricted slot or linking slot is 0
    /// - Each restricted slot appears once
    /// - The bridge buffer is non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slots.linking_slot == 0 {
            return Err(ConfigError::ValidationError {
                message: "slots.linking_slot must be 1 or greater".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for rule in &self.slots.restricted {
            if rule.slot == 0 {
                return Err(ConfigError::ValidationError {
                    message: "Restricted slot numbers start at 1".to_string(),
                });
            }
            if !seen.insert(rule.slot) {
                return Err(ConfigError::ValidationError {
                    message: format!("Restricted slot {} is listed more than once", rule.slot),
                });
            }
        }

        if self.bridge.buffer == 0 {
            return Err(ConfigError::ValidationError {
                message: "bridge.buffer must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::RestrictedSlot;
    use crate::inventory::ItemCategory;

    #[test]
    fn defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn duplicate_restricted_slot_is_rejected() {
        let mut config = Config::default();
        config.slots.restricted.push(RestrictedSlot {
            slot: 1,
            category: ItemCategory::Phone,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn zero_buffer_is_rejected() {
        let mut config = Config::default();
        config.bridge.buffer = 0;
        assert!(config.validate().is_err());
    }
}
