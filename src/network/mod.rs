//! Network module.
//!
//! Contains the server connection, TLS setup and login sequence.

pub mod login;
mod tls;
pub mod transport;

pub use login::login_messages;
pub use transport::{Connection, LineStream, connect};
