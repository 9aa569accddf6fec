//! Framed I/O for the IMAP wire protocol.
//!
//! Responses are CRLF-terminated lines that may carry literals in the form
//! `{n}\r\n` followed by `n` raw bytes. A frame is one response line together
//! with all of its embedded literals.

use std::io;

use bytes::BytesMut;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::{Error, Result};

const READ_BUFFER_SIZE: usize = 8192;

/// Upper bound on a single response line.
const MAX_LINE_LENGTH: usize = 64 * 1024;

/// Upper bound on a literal. This client only fetches header fields, so
/// anything larger indicates a misbehaving server.
const MAX_LITERAL_SIZE: usize = 1024 * 1024;

/// Buffered IMAP framing over an async byte stream.
pub struct FramedStream<S> {
    reader: BufReader<S>,
    write_buffer: BytesMut,
}

impl<S> FramedStream<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wraps a raw stream.
    pub fn new(stream: S) -> Self {
        Self {
            reader: BufReader::with_capacity(READ_BUFFER_SIZE, stream),
            write_buffer: BytesMut::with_capacity(READ_BUFFER_SIZE),
        }
    }

    /// Reads one complete response frame, literals included.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors, closed connections, and frames exceeding the
    /// line or literal size bounds.
    pub async fn read_frame(&mut self) -> Result<Vec<u8>> {
        let mut frame = Vec::new();

        loop {
            let line = self.read_line().await?;
            frame.extend_from_slice(&line);

            let Some(len) = trailing_literal_length(&line) else {
                return Ok(frame);
            };
            if len > MAX_LITERAL_SIZE {
                return Err(Error::Protocol(format!(
                    "literal of {len} bytes exceeds limit"
                )));
            }

            let mut literal = vec![0u8; len];
            self.reader.read_exact(&mut literal).await?;
            frame.extend_from_slice(&literal);
            // The line after a literal may announce another literal.
        }
    }

    /// Reads frames until the one tagged with `tag`, returning all of them
    /// in arrival order (tagged frame last).
    ///
    /// # Errors
    ///
    /// Propagates frame read failures.
    pub async fn read_until_tagged(&mut self, tag: &str) -> Result<Vec<Vec<u8>>> {
        let mut frames = Vec::new();

        loop {
            let frame = self.read_frame().await?;
            let is_tagged = frame.starts_with(tag.as_bytes())
                && frame.get(tag.len()).is_some_and(|&b| b == b' ');
            frames.push(frame);
            if is_tagged {
                return Ok(frames);
            }
        }
    }

    async fn read_line(&mut self) -> Result<Vec<u8>> {
        let mut line = Vec::new();

        loop {
            let buf = self.reader.fill_buf().await?;
            if buf.is_empty() {
                return Err(Error::Io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed by server",
                )));
            }

            // The terminator may arrive split across reads, with the CR
            // at the end of the previous chunk.
            if line.last() == Some(&b'\r') && buf[0] == b'\n' {
                line.push(b'\n');
                self.reader.consume(1);
                return Ok(line);
            }

            if let Some(pos) = buf.windows(2).position(|w| w == b"\r\n") {
                line.extend_from_slice(&buf[..pos + 2]);
                self.reader.consume(pos + 2);
                return Ok(line);
            }

            let len = buf.len();
            line.extend_from_slice(buf);
            self.reader.consume(len);

            if line.len() > MAX_LINE_LENGTH {
                return Err(Error::Protocol("response line too long".to_string()));
            }
        }
    }

    /// Writes a serialized command and flushes.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors.
    pub async fn write_command(&mut self, data: &[u8]) -> Result<()> {
        self.write_buffer.clear();
        self.write_buffer.extend_from_slice(data);

        let stream = self.reader.get_mut();
        stream.write_all(&self.write_buffer).await?;
        stream.flush().await?;
        Ok(())
    }
}

/// Extracts the literal length announced at the end of a line, if any.
///
/// Recognizes `{n}\r\n` and the non-synchronizing `{n+}\r\n`.
fn trailing_literal_length(line: &[u8]) -> Option<usize> {
    let line = line.strip_suffix(b"\r\n")?;
    let line = line.strip_suffix(b"}")?;
    let line = line.strip_suffix(b"+").unwrap_or(line);

    let open = line.iter().rposition(|&b| b == b'{')?;
    std::str::from_utf8(&line[open + 1..]).ok()?.parse().ok()
}
