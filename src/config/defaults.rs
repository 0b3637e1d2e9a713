//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

// =============================================================================
// Server Defaults
// =============================================================================

pub fn default_port() -> u16 {
    6697
}

// =============================================================================
// Bot Defaults
// =============================================================================

pub fn default_channel() -> String {
    "#test".to_string()
}

pub fn default_quit_message() -> String {
    "Goodbye Cruel World".to_string()
}

// =============================================================================
// History Defaults
// =============================================================================

pub fn default_history_command() -> String {
    "PRIVMSG".to_string()
}

pub fn default_retrieval_token() -> String {
    "!history".to_string()
}

pub fn default_empty_notice() -> String {
    "No messages".to_string()
}

// =============================================================================
// Router Defaults
// =============================================================================

pub fn default_outbound_capacity() -> usize {
    256
}

// =============================================================================
// Log Defaults
// =============================================================================

pub fn default_log_level() -> String {
    "info".to_string()
}
