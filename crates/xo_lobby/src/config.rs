//! Lobby configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Configuration for a lobby process.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Deserialize)]
#[setters(prefix = "with_", into)]
pub struct LobbyConfig {
    /// Prefix of issued session tokens (`"{prefix}-{n}"`).
    #[serde(default = "default_token_prefix")]
    token_prefix: String,

    /// Tracing filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

#[instrument]
fn default_token_prefix() -> String {
    "session".to_string()
}

#[instrument]
fn default_log_filter() -> String {
    "info,xo_lobby=debug,xo_engine=debug".to_string()
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            token_prefix: default_token_prefix(),
            log_filter: default_log_filter(),
        }
    }
}

impl LobbyConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(token_prefix = %config.token_prefix, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.token_prefix.is_empty() {
            return Err(ConfigError::new("token_prefix must not be empty"));
        }
        Ok(config)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
