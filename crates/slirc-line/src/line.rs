//! Line-based codec for tokio.
//!
//! Reads and writes newline-terminated lines. The decoder never fails on
//! content: overlong lines are discarded and invalid UTF-8 is replaced, so a
//! single bad line cannot end the stream. Only I/O errors surface.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

use crate::error;

/// Maximum accepted line length in bytes, terminator included.
pub const MAX_LINE_LEN: usize = 8191;

/// Line-based codec that handles newline-terminated messages.
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
    /// Dropping the rest of an overlong line until its newline arrives
    discarding: bool,
}

impl LineCodec {
    /// Create a codec with the default maximum line length.
    pub fn new() -> Self {
        Self::with_max_len(MAX_LINE_LEN)
    }

    /// Create a codec with a custom maximum line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }

    /// Cut outgoing data at its first line ending.
    ///
    /// Keeps a raw passthrough from smuggling a second protocol line.
    pub fn sanitize(data: &str) -> &str {
        match data.find(['\r', '\n']) {
            Some(pos) => &data[..pos],
            None => data,
        }
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        loop {
            // Look for newline starting from where we left off
            let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
                self.next_index = src.len();

                // Partial line already too long: drop what we have and keep
                // discarding until the terminator shows up.
                if src.len() > self.max_len {
                    warn!(len = src.len(), limit = self.max_len, "Discarding overlong line");
                    src.clear();
                    self.next_index = 0;
                    self.discarding = true;
                }
                return Ok(None);
            };

            let line = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            if self.discarding {
                self.discarding = false;
                continue;
            }
            if line.len() > self.max_len {
                warn!(len = line.len(), limit = self.max_len, "Discarding overlong line");
                continue;
            }

            let text = String::from_utf8_lossy(&line);
            return Ok(Some(text.trim_end_matches(['\r', '\n']).to_string()));
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        // An unterminated final line is still a line.
        self.next_index = 0;
        if src.is_empty() || std::mem::take(&mut self.discarding) {
            src.clear();
            return Ok(None);
        }
        let rest = src.split();
        Ok(Some(String::from_utf8_lossy(&rest).trim_end_matches('\r').to_string()))
    }
}

impl Encoder<String> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: String, dst: &mut BytesMut) -> error::Result<()> {
        let line = Self::sanitize(&msg);
        dst.reserve(line.len() + 2);
        dst.put_slice(line.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
