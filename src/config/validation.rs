//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Smallest useful line length: enough for a keepalive and its reply.
const MIN_LINE_LEN: usize = 16;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.host is required")]
    MissingHost,
    #[error("server.port must be non-zero")]
    InvalidPort,
    #[error("identity.{0} must be non-empty and contain no spaces")]
    InvalidIdentity(&'static str),
    #[error("bot.channel must start with '#' or '&', got '{0}'")]
    InvalidChannel(String),
    #[error("history.{0} must be a single non-empty word")]
    InvalidHistoryToken(&'static str),
    #[error("limits.{0} must be greater than zero")]
    ZeroLimit(&'static str),
    #[error("limits.max_line_len must be at least {MIN_LINE_LEN}, got {0}")]
    LineLenTooSmall(usize),
    #[error("router.outbound_capacity must be greater than zero")]
    ZeroOutboundCapacity,
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && !s.contains(char::is_whitespace)
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(ValidationError::MissingHost);
    }
    if config.server.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }

    if !is_word(&config.identity.nickname) {
        errors.push(ValidationError::InvalidIdentity("nickname"));
    }
    if !is_word(&config.identity.username) {
        errors.push(ValidationError::InvalidIdentity("username"));
    }

    let channel = &config.bot.channel;
    if !channel.starts_with(['#', '&']) || !is_word(channel) {
        errors.push(ValidationError::InvalidChannel(channel.clone()));
    }

    if !is_word(&config.history.command) {
        errors.push(ValidationError::InvalidHistoryToken("command"));
    }
    if !is_word(&config.history.retrieval_token) {
        errors.push(ValidationError::InvalidHistoryToken("retrieval_token"));
    }

    let limits = &config.limits;
    if limits.max_params == 0 {
        errors.push(ValidationError::ZeroLimit("max_params"));
    }
    if limits.max_param_len == 0 {
        errors.push(ValidationError::ZeroLimit("max_param_len"));
    }
    if limits.max_line_len < MIN_LINE_LEN {
        errors.push(ValidationError::LineLenTooSmall(limits.max_line_len));
    }

    if config.router.outbound_capacity == 0 {
        errors.push(ValidationError::ZeroOutboundCapacity);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
