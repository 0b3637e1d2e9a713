//! Handler context and the `Handler` trait.

use crate::error::HandlerResult;
use async_trait::async_trait;
use slirc_wire::Message;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Context handed to every dispatched handler.
///
/// Cheap to clone; each spawned task gets its own copy.
#[derive(Debug, Clone)]
pub struct Context {
    /// Sender for outgoing messages to the server.
    pub sender: mpsc::Sender<Message>,
}

impl Context {
    pub fn new(sender: mpsc::Sender<Message>) -> Self {
        Self { sender }
    }

    /// Queue a message for the writer.
    pub async fn send(&self, msg: Message) -> HandlerResult {
        self.sender.send(msg).await?;
        Ok(())
    }

    /// Answer `msg` at its reply target using the same command.
    ///
    /// Does nothing when the message has no usable target.
    pub async fn reply(&self, msg: &Message, text: impl Into<String>) -> HandlerResult {
        let Some(target) = msg.response_target() else {
            return Ok(());
        };
        self.send(Message::new(msg.command.as_str(), [target.to_owned(), text.into()]))
            .await
    }
}

/// A dispatch target for command or prefix routes.
///
/// Handlers run on their own task, so they receive an owned context and a
/// shared message.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: Context, msg: Arc<Message>) -> HandlerResult;
}

#[async_trait]
impl<F, Fut> Handler for F
where
    F: Fn(Context, Arc<Message>) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    async fn handle(&self, ctx: Context, msg: Arc<Message>) -> HandlerResult {
        (self)(ctx, msg).await
    }
}
