//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable overriding `rcon.address`.
pub const ENV_RCON_ADDR: &str = "RCON_ADDR";

/// Environment variable overriding `rcon.password`.
pub const ENV_RCON_PASS: &str = "RCON_PASS";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Remote console connection.
    #[serde(default)]
    pub rcon: RconConfig,

    /// Marker defaults shown in responses.
    #[serde(default)]
    pub markers: MarkerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Replaces RCON settings with `RCON_ADDR` / `RCON_PASS` when set.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            std::env::var(ENV_RCON_ADDR).ok(),
            std::env::var(ENV_RCON_PASS).ok(),
        );
    }

    fn apply_overrides(&mut self, address: Option<String>, password: Option<String>) {
        if let Some(address) = address.filter(|a| !a.is_empty()) {
            self.rcon.address = address;
        }
        if let Some(password) = password.filter(|p| !p.is_empty()) {
            self.rcon.password = password;
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rcon.address.is_empty() {
            return Err(ConfigError::validation(format!(
                "rcon.address is required (or set {ENV_RCON_ADDR})"
            )));
        }
        if !self.rcon.address.contains(':') {
            return Err(ConfigError::validation(format!(
                "rcon.address '{}' must be host:port",
                self.rcon.address
            )));
        }
        if self.rcon.password.is_empty() {
            return Err(ConfigError::validation(format!(
                "rcon.password is required (or set {ENV_RCON_PASS})"
            )));
        }
        if self.rcon.timeout_secs == 0 {
            return Err(ConfigError::validation(
                "rcon.timeout_secs must be greater than zero",
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

/// Remote console settings.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RconConfig {
    /// Server RCON address as `host:port`.
    #[serde(default)]
    pub address: String,

    /// RCON password.
    #[serde(default)]
    pub password: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl RconConfig {
    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RconConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            password: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for RconConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RconConfig")
            .field("address", &self.address)
            .field("password", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

const fn default_timeout_secs() -> u64 {
    4
}

/// Defaults substituted when a marker omits its set or icon.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkerConfig {
    /// Set name reported when none was given.
    #[serde(default = "default_set")]
    pub default_set: String,

    /// Icon name reported when none was given.
    #[serde(default = "default_icon")]
    pub default_icon: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            default_set: default_set(),
            default_icon: default_icon(),
        }
    }
}

fn default_set() -> String {
    "Markers".to_string()
}

fn default_icon() -> String {
    "default".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.rcon.address = "127.0.0.1:25575".to_string();
        config.rcon.password = "hunter2".to_string();
        config
    }

    #[test]
    fn parse_minimal_config() {
        let json = r#"{"rcon": {"address": "mc.example.org:25575", "password": "pw"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.rcon.timeout(), Duration::from_secs(4));
        assert_eq!(config.markers.default_set, "Markers");
        assert_eq!(config.markers.default_icon, "default");
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "_comment": "Test config",
            "rcon": {
                "address": "10.0.0.5:25575",
                "password": "secret",
                "timeout_secs": 10
            },
            "markers": {
                "default_set": "Bases",
                "default_icon": "house"
            },
            "logging": {
                "level": "debug"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.rcon.address, "10.0.0.5:25575");
        assert_eq!(config.rcon.timeout_secs, 10);
        assert_eq!(config.markers.default_set, "Bases");
        assert_eq!(config.markers.default_icon, "house");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn empty_config_fails_validation() {
        let config: Config = serde_json::from_str("{}").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("rcon.address"));
    }

    #[test]
    fn reject_address_without_port() {
        let mut config = valid_config();
        config.rcon.address = "localhost".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_zero_timeout() {
        let mut config = valid_config();
        config.rcon.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_invalid_log_level() {
        let mut config = valid_config();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_unknown_fields() {
        let json = r#"{
            "unknown_field": "value"
        }"#;

        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = valid_config();
        config.apply_overrides(Some("mc:25575".to_string()), None);
        assert_eq!(config.rcon.address, "mc:25575");
        assert_eq!(config.rcon.password, "hunter2");

        config.apply_overrides(Some(String::new()), Some("new".to_string()));
        assert_eq!(config.rcon.address, "mc:25575");
        assert_eq!(config.rcon.password, "new");
    }

    #[test]
    fn debug_redacts_password() {
        let config = valid_config();
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
