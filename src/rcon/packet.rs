//! RCON packet codec.
//!
//! # Packet Format
//!
//! ```text
//! [Length:4 LE][RequestId:4 LE][Type:4 LE][Body:Length-10][0x00][0x00]
//! ```
//!
//! `Length` counts every byte after itself, so the smallest valid packet has a
//! length of 10 (empty body).

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::error::{RconError, RconResult};

/// Login request.
pub const SERVERDATA_AUTH: i32 = 3;
/// Login response.
pub const SERVERDATA_AUTH_RESPONSE: i32 = 2;
/// Command request.
pub const SERVERDATA_EXECCOMMAND: i32 = 2;
/// Command response.
pub const SERVERDATA_RESPONSE_VALUE: i32 = 0;

/// Request id the server answers with when the password is wrong.
pub const AUTH_FAILED_ID: i32 = -1;

/// Longest command body the Minecraft server accepts.
pub const MAX_COMMAND_LEN: usize = 1446;

/// Id + type + two null terminators.
const HEADER_LEN: usize = 10;

/// Largest response payload the server sends in one packet, plus header.
const MAX_PACKET_LEN: usize = 4096 + HEADER_LEN;

/// A single RCON packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Request id, echoed by the server.
    pub id: i32,
    /// Packet type.
    pub kind: i32,
    /// Body text.
    pub body: String,
}

impl Packet {
    /// Creates a new packet.
    pub fn new(id: i32, kind: i32, body: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            body: body.into(),
        }
    }

    /// Encodes the packet into its wire representation.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let body = self.body.as_bytes();
        let mut data = Vec::with_capacity(4 + HEADER_LEN + body.len());

        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let length = (HEADER_LEN + body.len()) as i32;
        data.extend_from_slice(&length.to_le_bytes());
        data.extend_from_slice(&self.id.to_le_bytes());
        data.extend_from_slice(&self.kind.to_le_bytes());
        data.extend_from_slice(body);
        data.extend_from_slice(&[0x00, 0x00]);
        data
    }

    /// Writes the packet and flushes the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub async fn write_to<W: AsyncWrite + Unpin>(&self, writer: &mut W) -> RconResult<()> {
        writer.write_all(&self.encode()).await?;
        writer.flush().await?;
        Ok(())
    }

    /// Reads one packet from the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the length prefix is out of range.
    pub async fn read_from<R: AsyncRead + Unpin>(reader: &mut R) -> RconResult<Self> {
        let length = reader.read_i32_le().await?;
        let length = usize::try_from(length)
            .ok()
            .filter(|len| (HEADER_LEN..=MAX_PACKET_LEN).contains(len))
            .ok_or_else(|| RconError::malformed(format!("invalid packet length {length}")))?;

        let mut data = vec![0u8; length];
        reader.read_exact(&mut data).await?;

        let id = i32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let kind = i32::from_le_bytes([data[4], data[5], data[6], data[7]]);

        // Body runs up to the first of the two trailing nulls
        let body = &data[8..length - 2];
        let body = body.split(|&b| b == 0).next().unwrap_or(body);

        Ok(Self {
            id,
            kind,
            body: String::from_utf8_lossy(body).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_layout() {
        let bytes = Packet::new(7, SERVERDATA_EXECCOMMAND, "list").encode();
        assert_eq!(&bytes[0..4], &14i32.to_le_bytes());
        assert_eq!(&bytes[4..8], &7i32.to_le_bytes());
        assert_eq!(&bytes[8..12], &2i32.to_le_bytes());
        assert_eq!(&bytes[12..16], b"list");
        assert_eq!(&bytes[16..], &[0, 0]);
    }

    #[tokio::test]
    async fn read_packet() {
        let wire = Packet::new(3, SERVERDATA_RESPONSE_VALUE, "There are 0 of a max of 20 players online.").encode();
        let mut reader = tokio_test::io::Builder::new().read(&wire).build();

        let packet = Packet::read_from(&mut reader).await.unwrap();
        assert_eq!(packet.id, 3);
        assert_eq!(packet.kind, SERVERDATA_RESPONSE_VALUE);
        assert_eq!(packet.body, "There are 0 of a max of 20 players online.");
    }

    #[tokio::test]
    async fn read_empty_body() {
        let wire = Packet::new(1, SERVERDATA_AUTH_RESPONSE, "").encode();
        let mut reader = tokio_test::io::Builder::new().read(&wire).build();

        let packet = Packet::read_from(&mut reader).await.unwrap();
        assert!(packet.body.is_empty());
    }

    #[tokio::test]
    async fn reject_short_length() {
        let mut reader = tokio_test::io::Builder::new()
            .read(&4i32.to_le_bytes())
            .build();

        let err = Packet::read_from(&mut reader).await.unwrap_err();
        assert!(matches!(err, RconError::MalformedPacket { .. }));
    }

    #[tokio::test]
    async fn reject_negative_length() {
        let mut reader = tokio_test::io::Builder::new()
            .read(&(-5i32).to_le_bytes())
            .build();

        assert!(Packet::read_from(&mut reader).await.is_err());
    }
}
