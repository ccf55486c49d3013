//! Configuration file loading and parsing.
//!
//! This module handles loading the configuration file from disk and parsing
//! it into validated, type-safe structures.
//!
//! # Configuration File Locations
//!
//! The configuration file is searched in the following order:
//!
//! 1. Path given with the `--config` CLI option
//! 2. Default location:
//!    - **Linux/macOS:** `~/.dynmap-rcon-bot/config.json`
//!    - **Windows:** `%USERPROFILE%\.dynmap-rcon-bot\config.json`
//!
//! If no path is given and the default file does not exist, the bot runs on
//! defaults plus the `RCON_ADDR` / `RCON_PASS` environment variables.
//!
//! # Example Configuration
//!
//! ```json
//! {
//!   "rcon": { "address": "127.0.0.1:25575", "password": "changeme", "timeout_secs": 4 },
//!   "markers": { "default_set": "Markers", "default_icon": "default" },
//!   "logging": { "level": "info" }
//! }
//! ```

mod settings;

pub use settings::{
    Config, LoggingConfig, MarkerConfig, RconConfig, ENV_RCON_ADDR, ENV_RCON_PASS,
};

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Returns the default configuration directory.
///
/// - **Linux/macOS:** `~/.dynmap-rcon-bot/`
/// - **Windows:** `%USERPROFILE%\.dynmap-rcon-bot\`
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".dynmap-rcon-bot"))
}

/// Returns the platform-specific default configuration file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|p| p.join("config.json"))
}

/// Loads, overrides from the environment, and validates the configuration.
///
/// If `path` is `None`, uses the platform-specific default location, falling
/// back to built-in defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given configuration file cannot be found
/// - The file cannot be read
/// - The JSON is malformed
/// - Required fields are missing or invalid after environment overrides
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::NotFound {
                    path: p.to_path_buf(),
                });
            }
            read_config_file(p)?
        }
        None => match default_config_path().filter(|p| p.exists()) {
            Some(p) => read_config_file(&p)?,
            None => Config::default(),
        },
    };

    config.apply_env_overrides();

    // Validate the configuration
    config.validate()?;

    Ok(config)
}

fn read_config_file(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}
