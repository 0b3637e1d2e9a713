//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config structs (Config, ServerConfig, IdentityConfig, BotConfig)
//! - [`history`]: Session history configuration (HistoryConfig)
//! - [`limits`]: Decoder and framing limits (LimitsConfig)
//! - [`validation`]: Startup checks returning every problem found

mod defaults;
mod history;
mod limits;
mod types;
mod validation;

pub use history::HistoryConfig;
pub use limits::LimitsConfig;
pub use types::{
    BotConfig, Config, ConfigError, IdentityConfig, LogConfig, LogFormat, RouterConfig,
    ServerConfig,
};
pub use validation::{ValidationError, validate};
