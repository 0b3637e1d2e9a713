//! slirc-bot - Straylight IRC Bot
//!
//! Connects to a server, answers keepalives, keeps a session chat history and
//! dispatches lines to registered handlers. Line decoding lives in the
//! `slirc-wire` crate.
//!
//! ```no_run
//! use slirc_bot::handlers::{EchoHandler, Registry};
//! use slirc_bot::router::{Router, RouterSettings};
//! use futures_util::stream;
//! use tokio::sync::mpsc;
//!
//! # async fn demo() {
//! let mut registry = Registry::new();
//! registry.register_prefix("!echo", EchoHandler);
//!
//! let (tx, _rx) = mpsc::channel(256);
//! let mut router = Router::new(RouterSettings::default(), registry, tx);
//! let lines = stream::iter(vec!["PING :irc.example.chat".to_string()]);
//! let shutdown = async {
//!     let _ = tokio::signal::ctrl_c().await;
//! };
//! router.run(lines, shutdown).await;
//! # }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod history;
pub mod network;
pub mod router;
pub mod telemetry;
