//! Line-based codec for tokio.
//!
//! Splits an inbound byte stream into lines with their CR/LF terminators
//! removed, and terminates outbound lines with CRLF.
//!
//! Errors are scoped to one line: after [`ProtocolError::LineTooLong`] the
//! codec discards input up to the next newline, and an invalid UTF-8 line is
//! consumed before the error is returned, so a caller driving the codec by
//! hand can log and keep reading.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::ProtocolError;

/// Default maximum line length, terminator included.
pub const MAX_LINE_LEN: usize = 512;

/// Newline-delimited codec producing UTF-8 lines.
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    max_len: usize,
    /// Dropping the remainder of an overlong line
    discarding: bool,
}

impl LineCodec {
    /// Create a codec limited to [`MAX_LINE_LEN`] bytes per line.
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

    /// Maximum accepted line length in bytes.
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>, ProtocolError> {
        if self.discarding {
            match src.iter().position(|b| *b == b'\n') {
                Some(offset) => {
                    let _ = src.split_to(offset + 1);
                    self.discarding = false;
                }
                None => {
                    src.clear();
                    return Ok(None);
                }
            }
        }

        let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
            // No complete line yet - remember where we stopped
            self.next_index = src.len();
            if src.len() > self.max_len {
                let actual = src.len();
                src.clear();
                self.next_index = 0;
                self.discarding = true;
                return Err(ProtocolError::LineTooLong {
                    actual,
                    limit: self.max_len,
                });
            }
            return Ok(None);
        };

        let line = src.split_to(self.next_index + offset + 1);
        self.next_index = 0;

        if line.len() > self.max_len {
            return Err(ProtocolError::LineTooLong {
                actual: line.len(),
                limit: self.max_len,
            });
        }

        let mut body = &line[..line.len() - 1];
        if let Some(stripped) = body.strip_suffix(b"\r") {
            body = stripped;
        }

        match std::str::from_utf8(body) {
            Ok(text) => Ok(Some(text.to_owned())),
            Err(e) => Err(ProtocolError::InvalidUtf8 {
                raw_line: body.to_vec(),
                byte_pos: e.valid_up_to(),
            }),
        }
    }
}

impl Encoder<String> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> Result<(), ProtocolError> {
        let body = line.trim_end_matches(['\r', '\n']);
        dst.reserve(body.len() + 2);
        dst.extend_from_slice(body.as_bytes());
        dst.extend_from_slice(b"\r\n");
        Ok(())
    }
}
