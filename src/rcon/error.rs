//! Error types for the remote console transport.
//!
//! # Security Note
//!
//! No variant carries the RCON password. Authentication failures are reported
//! without echoing what was sent.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Result type for RCON operations.
pub type RconResult<T> = Result<T, RconError>;

/// Errors that can occur while talking to the remote console.
#[derive(Debug, Error)]
pub enum RconError {
    /// The TCP connection could not be established.
    #[error("failed to connect to RCON server at {address}")]
    Connect {
        /// Address that was dialled.
        address: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Reading from or writing to the connection failed.
    #[error("RCON connection error")]
    Io(#[from] io::Error),

    /// The server rejected the password.
    #[error("RCON authentication failed")]
    AuthenticationFailed,

    /// The round trip did not finish in time.
    #[error("RCON request timed out after {after:?}")]
    Timeout {
        /// The timeout that elapsed.
        after: Duration,
    },

    /// The command is longer than the server accepts.
    #[error("RCON command is {len} bytes, maximum is {max}")]
    CommandTooLong {
        /// Length of the rejected command.
        len: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The server sent something that is not a valid packet.
    #[error("malformed RCON packet: {message}")]
    MalformedPacket {
        /// Description of what's wrong.
        message: String,
    },
}

impl RconError {
    /// Creates a connection error.
    pub fn connect(address: impl Into<String>, source: io::Error) -> Self {
        Self::Connect {
            address: address.into(),
            source,
        }
    }

    /// Creates a malformed packet error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPacket {
            message: message.into(),
        }
    }
}
