//! Connection registration.

use crate::config::IdentityConfig;
use slirc_wire::Message;

/// Messages that register the bot with the server, in send order:
/// `PASS` (when a password is configured), `NICK`, then `USER`.
pub fn login_messages(identity: &IdentityConfig) -> Vec<Message> {
    let mut messages = Vec::with_capacity(3);
    if let Some(password) = &identity.password {
        messages.push(Message::pass(password.as_str()));
    }
    messages.push(Message::nick(identity.nickname.as_str()));
    messages.push(Message::user(identity.username.as_str(), identity.realname()));
    messages
}
