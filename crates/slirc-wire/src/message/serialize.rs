//! Wire serialization for [`Message`].

use std::fmt;

use super::types::Message;

/// The final parameter must be written in trailing form when a plain middle
/// parameter could not carry it.
fn needs_trailing(param: &str) -> bool {
    param.is_empty() || param.starts_with(':') || param.contains(' ')
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.tags.is_empty() {
            write!(f, "@{} ", self.tags.join(";"))?;
        }
        if let Some(prefix) = &self.prefix {
            write!(f, ":{} ", prefix)?;
        }
        f.write_str(&self.command)?;

        if let Some((last, middle)) = self.params.split_last() {
            for param in middle {
                write!(f, " {}", param)?;
            }
            if needs_trailing(last) {
                write!(f, " :{}", last)?;
            } else {
                write!(f, " {}", last)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_plain() {
        assert_eq!(Message::join("#test").to_string(), "JOIN #test");
        assert_eq!(Message::pong("irc.example.chat").to_string(), "PONG irc.example.chat");
    }

    #[test]
    fn test_serialize_trailing() {
        assert_eq!(
            Message::privmsg("#test", "hello world").to_string(),
            "PRIVMSG #test :hello world"
        );
        assert_eq!(Message::quit("").to_string(), "QUIT :");
        assert_eq!(
            Message::user("bot", "Bot Name").to_string(),
            "USER bot 8 * :Bot Name"
        );
    }

    #[test]
    fn test_serialize_tags_and_prefix() {
        let msg = Message::new("254", ["#test", "hello", "the trailing part"])
            .with_tag("a=b")
            .with_tag("c")
            .with_prefix("irc.example.chat");
        assert_eq!(
            msg.to_string(),
            "@a=b;c :irc.example.chat 254 #test hello :the trailing part"
        );
    }

    #[test]
    fn test_serialize_decodes_back() {
        let raw = "@a=b :irc.example.chat 254 #test hello :the trailing part";
        let msg: Message = raw.parse().unwrap();
        assert_eq!(msg.to_string(), raw);
    }
}
