use crate::error::DecodeError;

/// A decoded IRC message.
///
/// # Example
///
/// ```
/// use slirc_wire::Message;
///
/// let msg: Message = ":nick!user@host PRIVMSG #chan :hi there".parse().unwrap();
/// assert_eq!(msg.command, "PRIVMSG");
/// assert_eq!(msg.trailing(), Some("hi there"));
/// assert_eq!(msg.source_nickname(), Some("nick"));
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// Raw tag strings in order of appearance. Empty when the line had no tag
    /// section.
    pub tags: Vec<String>,
    /// Originator, without the leading `:`.
    pub prefix: Option<String>,
    /// Three digits or one or more ASCII letters.
    pub command: String,
    /// Middle parameters followed by the trailing parameter, if any.
    pub params: Vec<String>,
}

impl Message {
    /// Create a message with no tags and no prefix.
    pub fn new<C, I, P>(command: C, params: I) -> Self
    where
        C: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            tags: Vec::new(),
            prefix: None,
            command: command.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Attach a prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Append a raw tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Get the parameter at `index`.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// The final parameter, whether or not it was sent in trailing form.
    pub fn trailing(&self) -> Option<&str> {
        self.params.last().map(String::as_str)
    }

    /// First whitespace-delimited word of the final parameter.
    pub fn first_word(&self) -> Option<&str> {
        self.trailing()?.split_whitespace().next()
    }

    /// True for three-digit numeric replies.
    pub fn is_numeric(&self) -> bool {
        self.command.len() == 3 && self.command.bytes().all(|b| b.is_ascii_digit())
    }

    /// Nickname portion of a `nick!user@host` prefix.
    pub fn source_nickname(&self) -> Option<&str> {
        let prefix = self.prefix.as_deref()?;
        let nick = prefix.split(['!', '@']).next().unwrap_or(prefix);
        (!nick.is_empty()).then_some(nick)
    }

    /// Where a reply to this message should go.
    ///
    /// Channel messages are answered in the channel; anything else goes back
    /// to the sender, falling back to the first parameter when the message
    /// carries no prefix.
    pub fn response_target(&self) -> Option<&str> {
        match self.arg(0) {
            Some(target) if target.starts_with(['#', '&']) => Some(target),
            first => self.source_nickname().or(first),
        }
    }

    /// Create a PONG answering a PING token.
    #[must_use]
    pub fn pong(token: impl Into<String>) -> Self {
        Self::new("PONG", [token.into()])
    }

    /// Create a JOIN for a channel.
    #[must_use]
    pub fn join(channel: impl Into<String>) -> Self {
        Self::new("JOIN", [channel.into()])
    }

    /// Create a PRIVMSG to a target.
    #[must_use]
    pub fn privmsg(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new("PRIVMSG", [target.into(), text.into()])
    }

    /// Create a NOTICE to a target.
    #[must_use]
    pub fn notice(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new("NOTICE", [target.into(), text.into()])
    }

    /// Create a QUIT with a reason.
    #[must_use]
    pub fn quit(reason: impl Into<String>) -> Self {
        Self::new("QUIT", [reason.into()])
    }

    /// Create a PASS.
    #[must_use]
    pub fn pass(password: impl Into<String>) -> Self {
        Self::new("PASS", [password.into()])
    }

    /// Create a NICK.
    #[must_use]
    pub fn nick(nickname: impl Into<String>) -> Self {
        Self::new("NICK", [nickname.into()])
    }

    /// Create a USER registration (`USER <user> 8 * :<realname>`).
    #[must_use]
    pub fn user(username: impl Into<String>, realname: impl Into<String>) -> Self {
        Self::new(
            "USER",
            [username.into(), "8".to_owned(), "*".to_owned(), realname.into()],
        )
    }
}

impl std::str::FromStr for Message {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::decode::decode(s)
    }
}
