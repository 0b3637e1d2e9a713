//! `!echo` handler.

use super::core::{Context, Handler};
use crate::error::HandlerResult;
use async_trait::async_trait;
use slirc_wire::Message;
use std::sync::Arc;

/// Repeats the final parameter back, quoted and escaped, at the message's
/// reply target using the command it arrived with.
pub struct EchoHandler;

#[async_trait]
impl Handler for EchoHandler {
    async fn handle(&self, ctx: Context, msg: Arc<Message>) -> HandlerResult {
        let Some(text) = msg.trailing() else {
            return Ok(());
        };
        ctx.reply(&msg, format!("{text:?}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_echo_quotes_text() {
        let (tx, mut rx) = mpsc::channel(4);
        let msg: Message = ":bob!b@host PRIVMSG #test :!echo say \"hi\"".parse().unwrap();

        EchoHandler
            .handle(Context::new(tx), Arc::new(msg))
            .await
            .unwrap();

        let reply = rx.recv().await.unwrap();
        assert_eq!(reply.command, "PRIVMSG");
        assert_eq!(reply.params, ["#test", r#""!echo say \"hi\"""#]);
    }

    #[tokio::test]
    async fn test_echo_private_goes_to_sender() {
        let (tx, mut rx) = mpsc::channel(4);
        let msg: Message = ":bob!b@host NOTICE slbot :!echo".parse().unwrap();

        EchoHandler
            .handle(Context::new(tx), Arc::new(msg))
            .await
            .unwrap();

        let reply = rx.recv().await.unwrap();
        assert_eq!(reply.to_string(), "NOTICE bob \"!echo\"");
    }
}
