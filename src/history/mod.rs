//! Session chat history.
//!
//! An append-only log of chat lines seen since startup. Appends and snapshots
//! both happen on the dispatch loop; [`replay`] sends a snapshot from a
//! spawned task. Every access goes through the mutex.

use crate::error::HandlerResult;
use parking_lot::Mutex;
use slirc_wire::Message;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Shared, lock-guarded chat history.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Arc<Mutex<Vec<String>>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry at the end.
    pub fn append(&self, entry: impl Into<String>) {
        self.entries.lock().push(entry.into());
    }

    /// Copy of every entry in arrival order.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

/// Send `entries` to `target`, one PRIVMSG per entry.
///
/// An empty list produces a single NOTICE carrying `empty_notice`. Callers
/// take the snapshot when the request is classified, so the reply holds
/// exactly the entries recorded before it.
pub async fn replay(
    entries: Vec<String>,
    sender: &mpsc::Sender<Message>,
    target: &str,
    empty_notice: &str,
) -> HandlerResult {
    if entries.is_empty() {
        sender.send(Message::notice(target, empty_notice)).await?;
        return Ok(());
    }
    for entry in entries {
        sender.send(Message::privmsg(target, entry)).await?;
    }
    Ok(())
}
