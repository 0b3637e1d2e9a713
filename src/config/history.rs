//! Session history configuration.

use serde::Deserialize;

use super::defaults::{
    default_empty_notice, default_history_command, default_retrieval_token, default_true,
};

/// Session history configuration.
///
/// When enabled, every chat delivery (`command`) is either recorded or, if its
/// text starts with `retrieval_token`, answered with the recorded log.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Whether chat deliveries are intercepted for history (default: true).
    /// When false they fall through to the handler registry.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// The command that carries user-visible chat text (default: PRIVMSG).
    #[serde(default = "default_history_command")]
    pub command: String,
    /// Leading token that requests a replay (default: !history).
    #[serde(default = "default_retrieval_token")]
    pub retrieval_token: String,
    /// Notice sent when a replay is requested and nothing has been recorded.
    #[serde(default = "default_empty_notice")]
    pub empty_notice: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: default_history_command(),
            retrieval_token: default_retrieval_token(),
            empty_notice: default_empty_notice(),
        }
    }
}
