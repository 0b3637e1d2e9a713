//! Core handler infrastructure.
//!
//! - [`Handler`]: async trait implemented by every dispatch target, with a
//!   blanket impl for `Fn(Context, Arc<Message>) -> impl Future` closures
//! - [`Context`]: per-task handle on the outbound queue
//! - [`Registry`]: command and prefix routes with invocation counters

pub mod context;
pub mod registry;

pub use context::{Context, Handler};
pub use registry::Registry;
