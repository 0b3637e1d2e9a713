//! Dispatch loop.
//!
//! The [`Router`] consumes raw lines in arrival order, decodes each one and
//! classifies it synchronously:
//!
//! 1. `PING` is answered with `PONG` on the spot; the first one of a run also
//!    triggers the channel `JOIN`.
//! 2. Chat lines are appended to the session [`History`], or, when they start
//!    with the retrieval token, answered with a replay of it.
//! 3. Anything else goes to a command handler, then to a prefix handler keyed
//!    by the first word of the final parameter.
//!
//! Replays and handlers run on their own tasks and may finish in any order.
//! The loop itself only ever waits on the next line or the shutdown signal.

mod stats;

pub use stats::RouterStats;

use crate::config::{Config, HistoryConfig};
use crate::handlers::{Context, Handler, Registry};
use crate::history::{self, History};
use crate::telemetry::spans;
use futures_util::{Stream, StreamExt};
use slirc_wire::{DecodeLimits, Message, decode_with};
use stats::Counters;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinSet;
use tracing::{Instrument, debug, info, warn};

/// Router behaviour that does not live in the registry.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    /// Channel joined after the first keepalive.
    pub channel: String,
    /// Reason sent with QUIT on shutdown.
    pub quit_message: String,
    pub history: HistoryConfig,
    pub limits: DecodeLimits,
    /// How long to wait for in-flight tasks after the loop stops.
    pub drain_timeout: Duration,
}

impl RouterSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            channel: config.bot.channel.clone(),
            quit_message: config.bot.quit_message.clone(),
            history: config.history.clone(),
            limits: config.limits.decode_limits(),
            drain_timeout: Duration::from_millis(config.router.drain_timeout_ms),
        }
    }
}

impl Default for RouterSettings {
    fn default() -> Self {
        let bot = crate::config::BotConfig::default();
        Self {
            channel: bot.channel,
            quit_message: bot.quit_message,
            history: HistoryConfig::default(),
            limits: DecodeLimits::default(),
            drain_timeout: Duration::ZERO,
        }
    }
}

/// Why [`Router::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The shutdown signal fired. In-flight tasks got up to the drain
    /// timeout and the rest were aborted. QUIT was queued if there was room.
    Shutdown,
    /// The line stream ended or the outbound queue closed. In-flight tasks
    /// are detached and run to completion on their own.
    Disconnected,
}

/// Decodes inbound lines and dispatches them.
pub struct Router {
    settings: RouterSettings,
    registry: Arc<Registry>,
    history: History,
    sender: mpsc::Sender<Message>,
    counters: Counters,
    joined: bool,
}

impl Router {
    pub fn new(
        settings: RouterSettings,
        registry: Registry,
        sender: mpsc::Sender<Message>,
    ) -> Self {
        Self {
            settings,
            registry: Arc::new(registry),
            history: History::new(),
            sender,
            counters: Counters::default(),
            joined: false,
        }
    }

    /// Shared handle on the session history.
    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Snapshot of the decode and dispatch counters.
    pub fn stats(&self) -> RouterStats {
        self.counters.snapshot()
    }

    /// Process `lines` until the stream ends or `shutdown` completes.
    ///
    /// The loop never blocks on the outbound queue: keepalive replies and
    /// QUIT are dropped with a warning when it is full. On shutdown no
    /// further lines are read, in-flight tasks get up to the configured drain
    /// timeout, and a QUIT is queued before returning.
    pub async fn run<S, F>(&mut self, mut lines: S, shutdown: F) -> Exit
    where
        S: Stream<Item = String> + Unpin,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut tasks = JoinSet::new();

        let exit = loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break Exit::Shutdown;
                }

                line = lines.next() => {
                    let Some(line) = line else {
                        info!("Line stream ended");
                        break Exit::Disconnected;
                    };
                    if !self.handle_line(&line, &mut tasks) {
                        warn!("Outbound queue closed");
                        break Exit::Disconnected;
                    }
                }

                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(e) = joined {
                        warn!(error = %e, "Dispatch task failed");
                    }
                }
            }
        };

        match exit {
            Exit::Shutdown => {
                self.drain(&mut tasks).await;
                let quit = Message::quit(self.settings.quit_message.as_str());
                if let Err(e) = self.sender.try_send(quit) {
                    warn!(error = %e, "QUIT not queued");
                }
            }
            Exit::Disconnected => {
                if !tasks.is_empty() {
                    debug!(pending = tasks.len(), "Detaching dispatch tasks");
                }
                tasks.detach_all();
            }
        }

        exit
    }

    async fn drain(&self, tasks: &mut JoinSet<()>) {
        if tasks.is_empty() {
            return;
        }
        let pending = tasks.len();
        let timeout = self.settings.drain_timeout;
        if !timeout.is_zero() {
            let waited = tokio::time::timeout(timeout, async {
                while tasks.join_next().await.is_some() {}
            })
            .await;
            if waited.is_ok() {
                debug!(pending, "Dispatch tasks drained");
                return;
            }
        }
        debug!(pending, remaining = tasks.len(), "Aborting dispatch tasks");
        tasks.abort_all();
    }

    /// Classify one raw line without waiting on anything. Returns false once
    /// the outbound queue is gone.
    fn handle_line(&mut self, line: &str, tasks: &mut JoinSet<()>) -> bool {
        let msg = match decode_with(line, &self.settings.limits) {
            Ok(msg) => {
                self.counters.decoded();
                msg
            }
            Err(e) => {
                self.counters.rejected();
                debug!(error_code = e.error_code(), line = %line, "Dropping malformed line");
                return true;
            }
        };

        if msg.command == "PING" {
            return self.keepalive(&msg);
        }

        let msg = Arc::new(msg);

        if self.settings.history.enabled
            && msg.command == self.settings.history.command
            && let Some(text) = msg.trailing()
        {
            if text.starts_with(self.settings.history.retrieval_token.as_str()) {
                self.spawn_replay(&msg, tasks);
            } else {
                self.history.append(text);
            }
            return true;
        }

        if let Some(handler) = self.registry.command(&msg.command) {
            self.spawn_handler(handler, msg, "command", tasks);
        } else if let Some(handler) = msg.first_word().and_then(|w| self.registry.prefix(w)) {
            self.spawn_handler(handler, msg, "prefix", tasks);
        }
        true
    }

    /// Answer a PING and, the first time one gets through, join the channel.
    fn keepalive(&mut self, ping: &Message) -> bool {
        let pong = Message::new("PONG", ping.params.iter().cloned());
        if !self.queue(pong) {
            return false;
        }
        if !self.joined {
            info!(channel = %self.settings.channel, "Joining channel");
            let join = Message::join(self.settings.channel.as_str());
            match self.sender.try_send(join) {
                Ok(()) => self.joined = true,
                // Retried on the next PING.
                Err(TrySendError::Full(_)) => warn!("Outbound queue full, JOIN deferred"),
                Err(TrySendError::Closed(_)) => return false,
            }
        }
        true
    }

    /// Queue without waiting. Returns false once the queue is closed.
    fn queue(&self, msg: Message) -> bool {
        match self.sender.try_send(msg) {
            Ok(()) => true,
            Err(TrySendError::Full(msg)) => {
                warn!(command = %msg.command, "Outbound queue full, dropping reply");
                true
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    fn spawn_replay(&self, msg: &Arc<Message>, tasks: &mut JoinSet<()>) {
        let Some(target) = msg.response_target().map(str::to_owned) else {
            return;
        };
        self.counters.dispatched();

        // Fixed here, in line order, not when the task first runs.
        let entries = self.history.snapshot();
        let sender = self.sender.clone();
        let empty_notice = self.settings.history.empty_notice.clone();
        let span = spans::dispatch(&msg.command, "history", msg.source_nickname());

        tasks.spawn(
            async move {
                if let Err(e) = history::replay(entries, &sender, &target, &empty_notice).await {
                    debug!(error = %e, error_code = e.error_code(), "History replay failed");
                }
            }
            .instrument(span),
        );
    }

    fn spawn_handler(
        &self,
        handler: Arc<dyn Handler>,
        msg: Arc<Message>,
        route: &'static str,
        tasks: &mut JoinSet<()>,
    ) {
        self.counters.dispatched();

        let ctx = Context::new(self.sender.clone());
        let span = spans::dispatch(&msg.command, route, msg.source_nickname());

        tasks.spawn(
            async move {
                if let Err(e) = handler.handle(ctx, msg).await {
                    debug!(error = %e, error_code = e.error_code(), "Handler error");
                }
            }
            .instrument(span),
        );
    }
}
