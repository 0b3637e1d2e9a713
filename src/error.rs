//! Unified error handling for slirc-bot.
//!
//! Handler failures are logged and counted by the dispatch loop; none of them
//! stop the loop or produce a protocol reply.

use slirc_wire::Message;
use thiserror::Error;
use tokio::sync::mpsc;

// ============================================================================
// Handler Errors (dispatch)
// ============================================================================

/// Errors that can occur inside a dispatched handler.
#[derive(Debug, Error)]
#[allow(clippy::large_enum_variant)] // Send variant carries the unsent message
pub enum HandlerError {
    /// The outbound queue is closed; the connection is going away.
    #[error("send error: {0}")]
    Send(#[from] mpsc::error::SendError<Message>),

    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Get a static error code string for log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Send(_) => "send_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

/// Result type for handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Transport Errors (connect)
// ============================================================================

/// Errors raised while establishing the server connection.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("TLS configuration failed: {0}")]
    Tls(#[from] tokio_rustls::rustls::Error),

    #[error("invalid server name for TLS: {0}")]
    InvalidServerName(String),
}
