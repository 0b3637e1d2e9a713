//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::defaults::{
    default_channel, default_log_level, default_outbound_capacity, default_port,
    default_quit_message, default_true,
};
use super::history::HistoryConfig;
use super::limits::LimitsConfig;
use super::validation::{ValidationError, validate};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Remote server to connect to.
    pub server: ServerConfig,
    /// Login identity.
    pub identity: IdentityConfig,
    /// Bot behaviour.
    #[serde(default)]
    pub bot: BotConfig,
    /// Session history.
    #[serde(default)]
    pub history: HistoryConfig,
    /// Decoder and framing limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Dispatch loop tuning.
    #[serde(default)]
    pub router: RouterConfig,
    /// Logging.
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

/// Remote server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Hostname, also used for TLS SNI.
    pub host: String,
    /// Port (default: 6697).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Wrap the connection in TLS (default: true).
    #[serde(default = "default_true")]
    pub tls: bool,
    /// Verify the server certificate against the system roots (default: true).
    /// Disable only for self-signed test servers.
    #[serde(default = "default_true")]
    pub verify_cert: bool,
}

impl ServerConfig {
    /// `host:port` for `TcpStream::connect`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Identity presented at login.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub nickname: String,
    pub username: String,
    /// Real name for USER (defaults to the username).
    #[serde(default)]
    pub realname: Option<String>,
    /// Connection password sent with PASS.
    #[serde(default)]
    pub password: Option<String>,
}

impl IdentityConfig {
    pub fn realname(&self) -> &str {
        self.realname.as_deref().unwrap_or(&self.username)
    }
}

/// Bot behaviour configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Channel joined after the first keepalive (default: #test).
    #[serde(default = "default_channel")]
    pub channel: String,
    /// Reason sent with QUIT on shutdown.
    #[serde(default = "default_quit_message")]
    pub quit_message: String,
    /// Register the `!echo` prefix handler (default: true).
    #[serde(default = "default_true")]
    pub echo: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            quit_message: default_quit_message(),
            echo: true,
        }
    }
}

/// Dispatch loop configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RouterConfig {
    /// Outbound message queue capacity (default: 256).
    #[serde(default = "default_outbound_capacity")]
    pub outbound_capacity: usize,
    /// How long to wait for in-flight handler tasks after shutdown, in
    /// milliseconds. 0 aborts them immediately (default: 0).
    #[serde(default)]
    pub drain_timeout_ms: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            outbound_capacity: default_outbound_capacity(),
            drain_timeout_ms: 0,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset (default: info).
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[server]
host = "irc.example.chat"

[identity]
nickname = "slbot"
username = "slbot"
"#;

    #[test]
    fn test_minimal_config_defaults() {
        let config = Config::from_toml(MINIMAL).unwrap();
        assert_eq!(config.server.port, 6697);
        assert!(config.server.tls);
        assert!(config.server.verify_cert);
        assert_eq!(config.identity.realname(), "slbot");
        assert_eq!(config.bot.channel, "#test");
        assert_eq!(config.bot.quit_message, "Goodbye Cruel World");
        assert!(config.history.enabled);
        assert_eq!(config.history.retrieval_token, "!history");
        assert_eq!(config.limits.max_params, 14);
        assert_eq!(config.limits.max_param_len, 14);
        assert_eq!(config.router.drain_timeout_ms, 0);
        assert_eq!(config.log.format, LogFormat::Pretty);
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
[server]
host = "localhost"
port = 6667
tls = false

[identity]
nickname = "slbot"
username = "bot"
realname = "Straylight Bot"
password = "hunter2"

[bot]
channel = "&local"
echo = false

[history]
enabled = false

[limits]
max_params = 15
max_param_len = 64

[log]
level = "debug"
format = "json"
"#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.server.address(), "localhost:6667");
        assert!(!config.server.tls);
        assert_eq!(config.identity.realname(), "Straylight Bot");
        assert_eq!(config.identity.password.as_deref(), Some("hunter2"));
        assert!(!config.bot.echo);
        assert!(!config.history.enabled);
        assert_eq!(config.limits.decode_limits().max_param_len, 64);
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, MINIMAL).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.identity.nickname, "slbot");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/slircbot.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let toml = r#"
[server]
host = "irc.example.chat"

[identity]
nickname = ""
username = "slbot"

[bot]
channel = "test"
"#;
        let err = Config::from_toml(toml).unwrap_err();
        match err {
            ConfigError::Invalid(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }
}
