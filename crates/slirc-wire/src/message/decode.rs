//! Four-stage line decoder.
//!
//! ```text
//! [@tags SPACE] [:prefix SPACE] command [SPACE params] [:trailing]
//! ```
//!
//! Each stage takes the [`Cursor`] left by the previous one and either returns
//! what it parsed together with an advanced cursor, or fails the whole line.

use crate::cursor::Cursor;
use crate::error::{DecodeError, Result};
use crate::limits::DecodeLimits;

use super::types::Message;

const TAG_MARKER: u8 = b'@';
const PREFIX_MARKER: u8 = b':';
const TRAILING_MARKER: u8 = b':';
const TAG_SEPARATOR: u8 = b';';
const SPACE: u8 = b' ';
const NUMERIC_LEN: usize = 3;

/// What follows the command.
#[derive(Debug)]
enum Tail<'a> {
    /// Command-only message; nothing left to parse.
    End,
    /// Parameter section. `None` when a numeric command was not followed by
    /// its separator.
    Params(Option<Cursor<'a>>),
}

/// Decode a line using the default [`DecodeLimits`].
///
/// The line must already have its CR/LF framing removed.
///
/// # Example
///
/// ```
/// use slirc_wire::decode;
///
/// let msg = decode("@a=b;c PRIVMSG #test hello").unwrap();
/// assert_eq!(msg.tags, ["a=b", "c"]);
/// assert_eq!(msg.prefix, None);
/// assert_eq!(msg.params, ["#test", "hello"]);
/// ```
pub fn decode(line: impl AsRef<[u8]>) -> Result<Message> {
    decode_with(line, &DecodeLimits::default())
}

/// Decode a line with explicit parameter limits.
pub fn decode_with(line: impl AsRef<[u8]>, limits: &DecodeLimits) -> Result<Message> {
    let cur = Cursor::new(line.as_ref());
    if cur.is_empty() {
        return Err(DecodeError::InvalidInput);
    }

    let (tags, cur) = tags(cur)?;
    let (prefix, cur) = prefix(cur)?;
    let (command, tail) = command(cur)?;
    let params = match tail {
        Tail::End => Vec::new(),
        Tail::Params(cur) => params(cur, limits)?,
    };

    Ok(Message {
        tags,
        prefix,
        command,
        params,
    })
}

fn tags(cur: Cursor<'_>) -> Result<(Vec<String>, Cursor<'_>)> {
    if cur.peek() != Some(TAG_MARKER) {
        return Ok((Vec::new(), cur));
    }

    let (_, body) = cur.take(1);
    match body.split_once(SPACE) {
        Some((span, rest)) if !span.is_empty() => {
            let tags = span.split(|&b| b == TAG_SEPARATOR).map(owned).collect();
            Ok((tags, rest))
        }
        _ => Err(DecodeError::InvalidTags),
    }
}

fn prefix(cur: Cursor<'_>) -> Result<(Option<String>, Cursor<'_>)> {
    let cur = cur.skip_while(|b| b == SPACE);
    if cur.peek() != Some(PREFIX_MARKER) {
        return Ok((None, cur));
    }

    let (_, body) = cur.take(1);
    let (span, rest) = body.split_once(SPACE).ok_or(DecodeError::InvalidPrefix)?;
    if span.is_empty() {
        return Err(DecodeError::InvalidPrefix);
    }
    // A prefix alone is not a message.
    if rest.is_empty() {
        return Err(DecodeError::InvalidInput);
    }

    Ok((Some(owned(span)), rest))
}

fn command(cur: Cursor<'_>) -> Result<(String, Tail<'_>)> {
    let first = cur.peek().ok_or(DecodeError::InvalidCommand)?;

    if first.is_ascii_digit() {
        let digits = cur
            .rest()
            .get(..NUMERIC_LEN)
            .ok_or(DecodeError::InvalidCommand)?;
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(DecodeError::InvalidCommand);
        }
        // The separator byte is skipped without inspection.
        return Ok((owned(digits), Tail::Params(cur.advance(NUMERIC_LEN + 1))));
    }

    let rest = cur.rest();
    let run = rest.iter().take_while(|b| b.is_ascii_alphabetic()).count();
    match rest.get(run) {
        _ if run == 0 => Err(DecodeError::InvalidCommand),
        None => Ok((owned(rest), Tail::End)),
        Some(&SPACE) => Ok((owned(&rest[..run]), Tail::Params(cur.advance(run + 1)))),
        Some(_) => Err(DecodeError::InvalidCommand),
    }
}

fn params(cur: Option<Cursor<'_>>, limits: &DecodeLimits) -> Result<Vec<String>> {
    let mut cur = cur.ok_or(DecodeError::InvalidParam)?;
    let mut params = Vec::new();

    while let Some(byte) = cur.peek() {
        if byte == TRAILING_MARKER {
            let trailing = cur.take(1).1.rest();
            if !trailing.is_empty() {
                if params.len() >= limits.max_params {
                    return Err(DecodeError::InvalidParam);
                }
                params.push(owned(trailing));
            }
            break;
        }

        if !is_param_byte(byte) {
            cur = cur.take(1).1;
            continue;
        }

        let len = cur
            .rest()
            .iter()
            .take_while(|&&b| is_param_byte(b) || b == TRAILING_MARKER)
            .count();
        if len > limits.max_param_len || params.len() >= limits.max_params {
            return Err(DecodeError::InvalidParam);
        }
        let (middle, next) = cur.take(len);
        params.push(owned(middle));
        cur = next;
    }

    Ok(params)
}

/// Any byte except NUL, LF, CR, space and `:` (RFC 2812 `nospcrlfcl`).
#[inline]
fn is_param_byte(b: u8) -> bool {
    !matches!(b, 0x00 | b'\n' | b'\r' | SPACE | TRAILING_MARKER)
}

#[inline]
fn owned(span: &[u8]) -> String {
    String::from_utf8_lossy(span).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_absent() {
        let (tags, cur) = tags(Cursor::new(b"PING x")).unwrap();
        assert!(tags.is_empty());
        assert_eq!(cur.position(), 0);
    }

    #[test]
    fn test_tags_split() {
        let (tags, cur) = tags(Cursor::new(b"@a=b;c;d=e PRIVMSG")).unwrap();
        assert_eq!(tags, ["a=b", "c", "d=e"]);
        assert_eq!(cur.rest(), b"PRIVMSG");
    }

    #[test]
    fn test_tags_keep_empty_pieces() {
        let (tags, _) = tags(Cursor::new(b"@a;;b PING")).unwrap();
        assert_eq!(tags, ["a", "", "b"]);
    }

    #[test]
    fn test_tags_unterminated() {
        assert_eq!(
            tags(Cursor::new(b"@a=b;c")).unwrap_err(),
            DecodeError::InvalidTags
        );
    }

    #[test]
    fn test_tags_empty_span() {
        assert_eq!(
            tags(Cursor::new(b"@ PRIVMSG")).unwrap_err(),
            DecodeError::InvalidTags
        );
    }

    #[test]
    fn test_prefix_skips_leading_spaces() {
        let (prefix, cur) = prefix(Cursor::new(b"   :srv PING")).unwrap();
        assert_eq!(prefix.as_deref(), Some("srv"));
        assert_eq!(cur.rest(), b"PING");
    }

    #[test]
    fn test_prefix_errors() {
        assert_eq!(
            prefix(Cursor::new(b":srv")).unwrap_err(),
            DecodeError::InvalidPrefix
        );
        assert_eq!(
            prefix(Cursor::new(b": PING")).unwrap_err(),
            DecodeError::InvalidPrefix
        );
        assert_eq!(
            prefix(Cursor::new(b":srv ")).unwrap_err(),
            DecodeError::InvalidInput
        );
    }

    #[test]
    fn test_command_letters_only() {
        let (cmd, tail) = command(Cursor::new(b"PRIVMSG #a")).unwrap();
        assert_eq!(cmd, "PRIVMSG");
        assert!(matches!(tail, Tail::Params(Some(c)) if c.rest() == b"#a"));

        let (cmd, tail) = command(Cursor::new(b"QUIT")).unwrap();
        assert_eq!(cmd, "QUIT");
        assert!(matches!(tail, Tail::End));
    }

    #[test]
    fn test_command_rejects_mixed() {
        assert_eq!(
            command(Cursor::new(b"PING123")).unwrap_err(),
            DecodeError::InvalidCommand
        );
        assert_eq!(
            command(Cursor::new(b"#chan")).unwrap_err(),
            DecodeError::InvalidCommand
        );
        assert_eq!(
            command(Cursor::new(b" PING")).unwrap_err(),
            DecodeError::InvalidCommand
        );
        assert_eq!(
            command(Cursor::new(b"")).unwrap_err(),
            DecodeError::InvalidCommand
        );
    }

    #[test]
    fn test_command_numeric() {
        let (cmd, tail) = command(Cursor::new(b"001 nick")).unwrap();
        assert_eq!(cmd, "001");
        assert!(matches!(tail, Tail::Params(Some(c)) if c.rest() == b"nick"));

        assert_eq!(
            command(Cursor::new(b"12")).unwrap_err(),
            DecodeError::InvalidCommand
        );
        assert_eq!(
            command(Cursor::new(b"1a3 x")).unwrap_err(),
            DecodeError::InvalidCommand
        );
    }

    #[test]
    fn test_command_numeric_without_separator() {
        let (cmd, tail) = command(Cursor::new(b"254")).unwrap();
        assert_eq!(cmd, "254");
        assert!(matches!(tail, Tail::Params(None)));
    }

    #[test]
    fn test_params_skip_separators() {
        let params = params(Some(Cursor::new(b"a   b\0c\r\n")), &DecodeLimits::default()).unwrap();
        assert_eq!(params, ["a", "b", "c"]);
    }

    #[test]
    fn test_params_trailing_keeps_spaces_and_colons() {
        let params = params(
            Some(Cursor::new(b"#x :hello: there  ")),
            &DecodeLimits::default(),
        )
        .unwrap();
        assert_eq!(params, ["#x", "hello: there  "]);
    }

    #[test]
    fn test_params_empty_trailing_dropped() {
        let params = params(Some(Cursor::new(b"#x :")), &DecodeLimits::default()).unwrap();
        assert_eq!(params, ["#x"]);
    }

    #[test]
    fn test_params_middle_may_contain_colon() {
        let params = params(Some(Cursor::new(b"a:b c")), &DecodeLimits::default()).unwrap();
        assert_eq!(params, ["a:b", "c"]);
    }

    #[test]
    fn test_params_caps_are_independent() {
        let wide = DecodeLimits::new(14, 64);
        assert!(params(Some(Cursor::new(b"abcdefghijklmnopqrstu")), &wide).is_ok());

        let few = DecodeLimits::new(2, 14);
        assert_eq!(
            params(Some(Cursor::new(b"a b c")), &few).unwrap_err(),
            DecodeError::InvalidParam
        );
        assert_eq!(
            params(Some(Cursor::new(b"a b :c")), &few).unwrap_err(),
            DecodeError::InvalidParam
        );
    }

    #[test]
    fn test_params_overrun_rejected() {
        assert_eq!(
            params(None, &DecodeLimits::default()).unwrap_err(),
            DecodeError::InvalidParam
        );
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode("").unwrap_err(), DecodeError::InvalidInput);
    }

    #[test]
    fn test_decode_numeric_at_end() {
        assert_eq!(decode("254").unwrap_err(), DecodeError::InvalidParam);

        let msg = decode("254 ").unwrap();
        assert_eq!(msg.command, "254");
        assert!(msg.params.is_empty());
    }

    #[test]
    fn test_decode_spaces_only_after_tags() {
        assert_eq!(decode("@a   ").unwrap_err(), DecodeError::InvalidCommand);
    }

    #[test]
    fn test_decode_double_space_after_prefix() {
        assert_eq!(
            decode(":srv  PRIVMSG #x").unwrap_err(),
            DecodeError::InvalidCommand
        );
    }

    #[test]
    fn test_decode_lossy_utf8() {
        let msg = decode(b"PRIVMSG #x :caf\xc3\xa9 \xff").unwrap();
        assert_eq!(msg.trailing(), Some("café \u{fffd}"));
    }
}
