//! Tracing subscriber setup and standard spans.

use crate::config::{LogConfig, LogFormat};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match config.format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Standardized span constructors for dispatch observability.
pub mod spans {
    use tracing::{Span, debug_span};

    /// Span for one dispatched handler or responder task.
    pub fn dispatch(command: &str, route: &'static str, source: Option<&str>) -> Span {
        debug_span!("bot.dispatch", command = %command, route = route, source = source)
    }
}
