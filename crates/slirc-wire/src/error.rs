//! Error types for the wire decoder and line codec.
//!
//! [`DecodeError`] classifies why a single line was rejected. It is cheap to
//! copy and carries no payload so callers can log, count and drop lines
//! without allocating. [`ProtocolError`] covers framing failures raised by
//! [`LineCodec`](crate::LineCodec).

use thiserror::Error;

/// Convenience type alias for decode results.
pub type Result<T, E = DecodeError> = std::result::Result<T, E>;

/// Reasons a line can fail to decode.
///
/// Every variant is scoped to the offending line; none of them should tear
/// down a connection.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DecodeError {
    /// The line was empty, or consisted of nothing but a prefix.
    #[error("invalid input")]
    InvalidInput,

    /// The tag section was empty or not terminated by a space.
    #[error("cannot parse tags, invalid input")]
    InvalidTags,

    /// The prefix was empty or not terminated by a space.
    #[error("cannot parse prefix, invalid input")]
    InvalidPrefix,

    /// The command was missing, mixed letters with other bytes, or was a
    /// numeric shorter than three digits.
    #[error("cannot parse command, invalid input")]
    InvalidCommand,

    /// Too many parameters, a middle parameter over the length cap, or no
    /// separator after a numeric command.
    #[error("cannot parse param, invalid input")]
    InvalidParam,
}

impl DecodeError {
    /// Static label for log fields and counters.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::InvalidTags => "invalid_tags",
            Self::InvalidPrefix => "invalid_prefix",
            Self::InvalidCommand => "invalid_command",
            Self::InvalidParam => "invalid_param",
        }
    }
}

/// Framing errors raised while reading or writing lines.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A received line was not valid UTF-8.
    #[error("invalid UTF-8 in line at byte {byte_pos}")]
    InvalidUtf8 {
        /// The raw line, terminators stripped.
        raw_line: Vec<u8>,
        /// Byte position where validation failed.
        byte_pos: usize,
    },

    /// A line exceeded the configured maximum length.
    #[error("line too long: {actual} bytes (limit: {limit})")]
    LineTooLong {
        /// Bytes buffered so far.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },
}
