//! Error types for Dynmap catalog and marker operations.

use std::num::ParseIntError;

use thiserror::Error;

use crate::rcon::RconError;

/// Result type for Dynmap operations.
pub type DynmapResult<T> = Result<T, DynmapError>;

/// Errors that can occur while talking to the Dynmap plugin.
#[derive(Debug, Error)]
pub enum DynmapError {
    /// The remote console round trip failed.
    #[error("remote console request failed: {0}")]
    Transport(#[from] RconError),

    /// A field expected to be `true` or `false` held something else.
    #[error("invalid boolean for {catalog} field '{field}': {token:?}")]
    InvalidBoolean {
        /// Catalog being parsed (`world`, `icon`, `set`).
        catalog: &'static str,
        /// Field name as emitted by the plugin.
        field: &'static str,
        /// The raw token that failed to convert.
        token: String,
    },

    /// A field expected to be an integer could not be parsed.
    #[error("invalid integer for {catalog} field '{field}': {token:?}")]
    InvalidInteger {
        /// Catalog being parsed (`world`, `icon`, `set`).
        catalog: &'static str,
        /// Field name as emitted by the plugin.
        field: &'static str,
        /// The raw token that failed to convert.
        token: String,
        /// Underlying parse error.
        #[source]
        source: ParseIntError,
    },

    /// The interaction did not carry exactly one option group.
    #[error("malformed application command: expected 1 option group, got {groups}")]
    MalformedCommand {
        /// Number of option groups received.
        groups: usize,
    },

    /// An option name outside the marker vocabulary.
    #[error("unrecognised option {name}")]
    UnrecognisedOption {
        /// The offending option name.
        name: String,
    },

    /// An option carried a value of the wrong kind.
    #[error("option '{name}' expects {expected} value")]
    OptionType {
        /// Option name.
        name: String,
        /// Expected kind (`a string`, `an integer`).
        expected: &'static str,
    },
}

impl DynmapError {
    /// Creates an invalid boolean error.
    pub fn invalid_boolean(catalog: &'static str, field: &'static str, token: &str) -> Self {
        Self::InvalidBoolean {
            catalog,
            field,
            token: token.to_string(),
        }
    }

    /// Creates an invalid integer error.
    pub fn invalid_integer(
        catalog: &'static str,
        field: &'static str,
        token: &str,
        source: ParseIntError,
    ) -> Self {
        Self::InvalidInteger {
            catalog,
            field,
            token: token.to_string(),
            source,
        }
    }

    /// Creates an unrecognised option error.
    pub fn unrecognised_option(name: impl Into<String>) -> Self {
        Self::UnrecognisedOption { name: name.into() }
    }

    /// Creates an option type error.
    pub fn option_type(name: impl Into<String>, expected: &'static str) -> Self {
        Self::OptionType {
            name: name.into(),
            expected,
        }
    }

    /// Returns `true` if this error came from the remote console rather than
    /// from the plugin's text or the interaction payload.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
