//! Dispatch handlers.
//!
//! Handlers are registered in a [`Registry`] under an exact command or under
//! the first word of a message's final parameter, then run on their own task
//! for every matching line.

pub mod core;
mod echo;

pub use self::core::{Context, Handler, Registry};
pub use echo::EchoHandler;
