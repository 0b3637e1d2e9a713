//! Integration test common infrastructure.
//!
//! [`TestBot`] runs a [`Router`] on its own task, fed by an in-memory line
//! queue, and exposes the outbound queue for assertions. Handlers run
//! detached, so tests await outbound messages instead of assuming order.

#![allow(dead_code)]

use futures_util::stream;
use slirc_bot::handlers::Registry;
use slirc_bot::router::{Exit, Router, RouterSettings};
use slirc_wire::Message;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// How long to wait for an expected outbound message.
pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);
/// How long to wait before concluding nothing more is coming.
pub const SILENCE: Duration = Duration::from_millis(100);

pub struct TestBot {
    lines: Option<mpsc::Sender<String>>,
    outbound: mpsc::Receiver<Message>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<(Router, Exit)>,
}

impl TestBot {
    pub fn spawn(registry: Registry) -> Self {
        Self::spawn_with(RouterSettings::default(), registry)
    }

    pub fn spawn_with(settings: RouterSettings, registry: Registry) -> Self {
        let (line_tx, line_rx) = mpsc::channel::<String>(64);
        let (out_tx, out_rx) = mpsc::channel(256);
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let lines = Box::pin(stream::unfold(line_rx, |mut rx| async move {
            rx.recv().await.map(|line| (line, rx))
        }));
        let shutdown = async move {
            let _ = stop_rx.await;
        };

        let mut router = Router::new(settings, registry, out_tx);
        let handle = tokio::spawn(async move {
            let exit = router.run(lines, shutdown).await;
            (router, exit)
        });

        Self {
            lines: Some(line_tx),
            outbound: out_rx,
            shutdown: Some(stop_tx),
            handle,
        }
    }

    /// Feed one raw line to the router.
    pub async fn send(&self, line: &str) {
        self.lines
            .as_ref()
            .expect("line queue already closed")
            .send(line.to_string())
            .await
            .expect("router stopped reading lines");
    }

    /// Next outbound message, failing the test after [`RECV_TIMEOUT`].
    pub async fn recv(&mut self) -> Message {
        tokio::time::timeout(RECV_TIMEOUT, self.outbound.recv())
            .await
            .expect("timed out waiting for outbound message")
            .expect("outbound queue closed")
    }

    /// Next `n` outbound messages as wire text.
    pub async fn recv_lines(&mut self, n: usize) -> Vec<String> {
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            out.push(self.recv().await.to_string());
        }
        out
    }

    /// Everything sent until the queue has been quiet for [`SILENCE`].
    pub async fn drain_until_silent(&mut self) -> Vec<Message> {
        let mut out = Vec::new();
        while let Ok(Some(msg)) = tokio::time::timeout(SILENCE, self.outbound.recv()).await {
            out.push(msg);
        }
        out
    }

    /// Assert nothing is sent within [`SILENCE`].
    pub async fn expect_silence(&mut self) {
        if let Ok(Some(msg)) = tokio::time::timeout(SILENCE, self.outbound.recv()).await {
            panic!("unexpected outbound message: {msg}");
        }
    }

    /// Fire the shutdown signal and wait for the router to return.
    ///
    /// Returns the router, its exit reason and whatever it queued on the way
    /// out.
    pub async fn shutdown(mut self) -> (Router, Exit, Vec<Message>) {
        if let Some(stop) = self.shutdown.take() {
            let _ = stop.send(());
        }
        self.finish().await
    }

    /// Close the line queue, as if the server hung up.
    pub async fn disconnect(mut self) -> (Router, Exit, Vec<Message>) {
        self.lines.take();
        self.finish().await
    }

    async fn finish(mut self) -> (Router, Exit, Vec<Message>) {
        let (router, exit) = tokio::time::timeout(RECV_TIMEOUT, &mut self.handle)
            .await
            .expect("router did not stop")
            .expect("router task panicked");
        let mut rest = Vec::new();
        while let Ok(msg) = self.outbound.try_recv() {
            rest.push(msg);
        }
        (router, exit, rest)
    }
}
