//! # slirc-wire
//!
//! Strict decoding of single IRC protocol lines into [`Message`] values, with
//! a small serializer for outbound replies and an optional tokio line codec.
//!
//! ## Grammar
//!
//! ```text
//! [@tags SPACE] [:prefix SPACE] command [SPACE params] [:trailing]
//! ```
//!
//! Decoding is total: every input yields either a complete [`Message`] or a
//! single [`DecodeError`]. Parameter count and middle-parameter length are
//! bounded independently by [`DecodeLimits`].
//!
//! ## Quick Start
//!
//! ```rust
//! use slirc_wire::{decode, DecodeError, Message};
//!
//! let msg = decode("@a=b :irc.example.chat 254 #test hello :the trailing part").unwrap();
//! assert_eq!(msg.prefix.as_deref(), Some("irc.example.chat"));
//! assert_eq!(msg.command, "254");
//! assert_eq!(msg.params, ["#test", "hello", "the trailing part"]);
//!
//! assert_eq!(decode(""), Err(DecodeError::InvalidInput));
//!
//! let reply = Message::privmsg("#test", "hi there");
//! assert_eq!(reply.to_string(), "PRIVMSG #test :hi there");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod cursor;
pub mod error;
pub mod limits;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;

pub use self::error::{DecodeError, ProtocolError};
pub use self::limits::{DecodeLimits, DEFAULT_MAX_PARAMS, DEFAULT_MAX_PARAM_LEN};
#[cfg(feature = "tokio")]
pub use self::line::{LineCodec, MAX_LINE_LEN};
pub use self::message::{decode, decode_with, Message};
