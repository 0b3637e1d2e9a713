//! slircbot - Straylight IRC Bot

use anyhow::Context as _;
use slirc_bot::config::Config;
use slirc_bot::handlers::{EchoHandler, Registry};
use slirc_bot::network;
use slirc_bot::router::{Exit, Router, RouterSettings};
use slirc_bot::telemetry;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// How long the writer gets to flush QUIT after the router stops.
const WRITER_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {config_path}"))?;

    telemetry::init(&config.log);

    info!(
        nickname = %config.identity.nickname,
        server = %config.server.address(),
        channel = %config.bot.channel,
        "Starting slircbot"
    );

    let connection = network::connect(&config.server, config.limits.max_line_len)
        .await
        .with_context(|| format!("failed to connect to {}", config.server.address()))?;

    let (tx, rx) = mpsc::channel(config.router.outbound_capacity);
    let (lines, writer) = connection.split(rx);

    for msg in network::login_messages(&config.identity) {
        tx.send(msg).await.context("connection closed during login")?;
    }

    let mut registry = Registry::new();
    if config.bot.echo {
        registry.register_prefix("!echo", EchoHandler);
    }

    let mut router = Router::new(RouterSettings::from_config(&config), registry, tx);
    let exit = router.run(lines, shutdown_signal()).await;

    let stats = router.stats();
    info!(
        decoded = stats.decoded,
        rejected = stats.rejected,
        dispatched = stats.dispatched,
        history = router.history().len(),
        "Router stopped"
    );
    for (route, count) in router.registry().get_route_stats() {
        info!(route = %route, count, "Route usage");
    }

    // Dropping the router closes the outbound queue so the writer can finish.
    drop(router);
    if tokio::time::timeout(WRITER_FLUSH_TIMEOUT, writer).await.is_err() {
        warn!("Writer did not finish in time");
    }

    match exit {
        Exit::Shutdown => Ok(()),
        Exit::Disconnected => Err(anyhow::anyhow!("disconnected from server")),
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
