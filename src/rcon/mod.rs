//! Minecraft remote console (RCON) transport.
//!
//! The bot talks to the server through a single request/response text
//! channel. Everything above this module depends only on the [`Transport`]
//! trait, so command handlers can be driven by a scripted double in tests and
//! the real client is an explicitly owned handle rather than process-wide
//! state.
//!
//! # Concurrency
//!
//! [`RconClient`] owns one TCP connection. Exchanges are serialised behind an
//! async mutex; concurrent callers queue rather than interleave packets.
//! Time spent waiting for the connection counts against the caller's timeout.
//! A failed or timed-out exchange drops the connection and the next call
//! dials again.
//!
//! # Fragmented Replies
//!
//! The server splits replies longer than 4096 bytes over several packets and
//! never marks the last one. [`Session::exec`] follows each command with an
//! empty `SERVERDATA_RESPONSE_VALUE` packet, which the server answers only
//! after the full reply; everything before that echo is one response.

pub mod error;
pub mod packet;

pub use error::{RconError, RconResult};
pub use packet::{Packet, MAX_COMMAND_LEN};

use std::future::Future;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::Mutex;

use packet::{
    AUTH_FAILED_ID, SERVERDATA_AUTH, SERVERDATA_AUTH_RESPONSE, SERVERDATA_EXECCOMMAND,
    SERVERDATA_RESPONSE_VALUE,
};

/// A request/response channel to the server console.
pub trait Transport: Send + Sync {
    /// Sends one console command and returns the server's reply text.
    fn send(&self, command: &str) -> impl Future<Output = RconResult<String>> + Send;
}

/// An authenticated RCON conversation over any byte stream.
#[derive(Debug)]
pub struct Session<S> {
    stream: S,
    next_id: i32,
}

impl<S: AsyncRead + AsyncWrite + Unpin> Session<S> {
    /// Logs in over `stream`.
    ///
    /// # Errors
    ///
    /// Returns [`RconError::AuthenticationFailed`] if the server rejects the
    /// password, or an I/O / packet error if the exchange breaks down.
    pub async fn login(stream: S, password: &str) -> RconResult<Self> {
        let mut session = Self { stream, next_id: 1 };
        let id = session.next_request_id();
        Packet::new(id, SERVERDATA_AUTH, password)
            .write_to(&mut session.stream)
            .await?;

        // Some servers send an empty RESPONSE_VALUE ahead of the auth reply
        for _ in 0..2 {
            let reply = Packet::read_from(&mut session.stream).await?;
            match (reply.kind, reply.id) {
                (SERVERDATA_AUTH_RESPONSE, AUTH_FAILED_ID) => {
                    return Err(RconError::AuthenticationFailed)
                }
                (SERVERDATA_AUTH_RESPONSE, reply_id) if reply_id == id => return Ok(session),
                (SERVERDATA_RESPONSE_VALUE, _) => {}
                (kind, reply_id) => {
                    return Err(RconError::malformed(format!(
                        "unexpected packet type {kind} (id {reply_id}) during login"
                    )))
                }
            }
        }

        Err(RconError::malformed("no auth response from server"))
    }

    /// Runs one command and returns the response body.
    ///
    /// Fragments of a long reply are joined in arrival order.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is too long, the exchange fails, or a
    /// packet answers neither this request nor its end marker.
    pub async fn exec(&mut self, command: &str) -> RconResult<String> {
        if command.len() > MAX_COMMAND_LEN {
            return Err(RconError::CommandTooLong {
                len: command.len(),
                max: MAX_COMMAND_LEN,
            });
        }

        let id = self.next_request_id();
        let end_marker = self.next_request_id();
        Packet::new(id, SERVERDATA_EXECCOMMAND, command)
            .write_to(&mut self.stream)
            .await?;
        Packet::new(end_marker, SERVERDATA_RESPONSE_VALUE, "")
            .write_to(&mut self.stream)
            .await?;

        let mut body = String::new();
        let mut fragments = 0usize;
        loop {
            let reply = Packet::read_from(&mut self.stream).await?;
            if reply.id == end_marker {
                break;
            }
            if reply.id != id {
                return Err(RconError::malformed(format!(
                    "response id {} does not match request {id}",
                    reply.id
                )));
            }
            body.push_str(&reply.body);
            fragments += 1;
        }

        if fragments > 1 {
            tracing::debug!(fragments, len = body.len(), "Joined fragmented RCON reply");
        }
        Ok(body)
    }

    fn next_request_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id = self.next_id.checked_add(1).unwrap_or(1);
        id
    }
}

/// RCON client for a Minecraft server.
///
/// Connects lazily on the first command. Every round trip is bounded by the
/// configured timeout and is never retried.
pub struct RconClient {
    address: String,
    password: String,
    timeout: Duration,
    session: Mutex<Option<Session<TcpStream>>>,
}

impl RconClient {
    /// Creates a client; no connection is made until the first command.
    pub fn new(address: impl Into<String>, password: impl Into<String>, timeout: Duration) -> Self {
        Self {
            address: address.into(),
            password: password.into(),
            timeout,
            session: Mutex::new(None),
        }
    }

    async fn connect(&self) -> RconResult<Session<TcpStream>> {
        let stream = TcpStream::connect(&self.address)
            .await
            .map_err(|e| RconError::connect(&self.address, e))?;
        let session = Session::login(stream, &self.password).await?;
        tracing::info!(address = %self.address, "Connected to RCON server");
        Ok(session)
    }

    async fn exchange(
        &self,
        slot: &mut Option<Session<TcpStream>>,
        command: &str,
    ) -> RconResult<String> {
        let mut session = match slot.take() {
            Some(session) => session,
            None => self.connect().await?,
        };

        // Only a clean exchange puts the connection back
        let response = session.exec(command).await?;
        *slot = Some(session);
        Ok(response)
    }
}

impl std::fmt::Debug for RconClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RconClient")
            .field("address", &self.address)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Transport for RconClient {
    async fn send(&self, command: &str) -> RconResult<String> {
        tracing::info!(command, "Running RCON command");

        let exchange = async {
            let mut slot = self.session.lock().await;
            self.exchange(&mut slot, command).await
        };
        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(RconError::Timeout {
                after: self.timeout,
            }),
        }
    }
}
