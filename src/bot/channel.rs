//! Line-delimited JSON channel to the chat gateway.
//!
//! - Messages are UTF-8 encoded JSON
//! - Messages are delimited by newlines
//! - Messages must not contain embedded newlines
//! - stdin carries interactions, stdout carries responses
//! - stderr is left to logging
//!
//! The channel is generic over its reader and writer so the serve loop can be
//! driven from in-memory buffers.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use super::interaction::Response;

/// A channel over the process's stdin and stdout.
pub type StdioChannel = LineChannel<BufReader<tokio::io::Stdin>, tokio::io::Stdout>;

/// Newline-delimited JSON over a reader/writer pair.
#[derive(Debug)]
pub struct LineChannel<R, W> {
    reader: R,
    writer: W,
}

impl StdioChannel {
    /// Creates a channel over stdin/stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> LineChannel<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Wraps a reader and writer.
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Reads the next line without its terminator.
    ///
    /// Returns `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let bytes_read = self.reader.read_line(&mut line).await?;

        if bytes_read == 0 {
            return Ok(None);
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }

        Ok(Some(line))
    }

    /// Writes one response line.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or writing fails.
    pub async fn write_response(&mut self, response: &Response) -> io::Result<()> {
        let json = serde_json::to_string(response)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        debug_assert!(
            !json.contains('\n'),
            "JSON message must not contain embedded newlines"
        );

        self.writer.write_all(json.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    /// Consumes the channel, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::interaction::InteractionId;

    #[tokio::test]
    async fn read_lines_and_eof() {
        let input: &[u8] = b"{\"a\":1}\r\nsecond\n";
        let mut channel = LineChannel::new(input, Vec::new());

        assert_eq!(channel.read_line().await.unwrap().as_deref(), Some("{\"a\":1}"));
        assert_eq!(channel.read_line().await.unwrap().as_deref(), Some("second"));
        assert_eq!(channel.read_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn multi_line_content_stays_on_one_line() {
        let input: &[u8] = b"";
        let mut channel = LineChannel::new(input, Vec::new());
        channel
            .write_response(&Response::message(
                InteractionId::Number(1),
                "There are 2 of a max of 20 players online:\n - a\n - b",
            ))
            .await
            .unwrap();

        let written = String::from_utf8(channel.into_writer()).unwrap();
        assert_eq!(written.matches('\n').count(), 1);
        assert!(written.ends_with('\n'));
        assert!(written.contains(r"online:\n - a"));
    }
}
