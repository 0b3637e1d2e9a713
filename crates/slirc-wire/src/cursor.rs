//! Byte cursor threaded through the decoder stages.
//!
//! A `Cursor` is a copyable view of "what is left to parse". Stages take it by
//! value and hand back an advanced copy, so no stage can observe or disturb
//! another stage's position.

/// Read position over a borrowed input line.
///
/// Invariant: `pos <= input.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    #[inline]
    pub(crate) fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Offset from the start of the line.
    #[cfg(test)]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// The unconsumed remainder.
    #[inline]
    pub(crate) fn rest(&self) -> &'a [u8] {
        self.input.get(self.pos..).unwrap_or_default()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.rest().first().copied()
    }

    /// Move forward by `n` bytes. Returns `None` when that would run past the
    /// end of the input.
    #[inline]
    pub(crate) fn advance(self, n: usize) -> Option<Self> {
        let pos = self.pos.checked_add(n)?;
        (pos <= self.input.len()).then_some(Self { pos, ..self })
    }

    /// Consume up to `n` bytes, returning them and the advanced cursor.
    /// Stops at the end of input instead of failing.
    #[inline]
    pub(crate) fn take(self, n: usize) -> (&'a [u8], Self) {
        let rest = self.rest();
        let n = n.min(rest.len());
        (
            &rest[..n],
            Self {
                pos: self.pos + n,
                ..self
            },
        )
    }

    /// Skip every leading byte matching `pred`.
    pub(crate) fn skip_while(self, pred: impl Fn(u8) -> bool) -> Self {
        let skipped = self.rest().iter().take_while(|&&b| pred(b)).count();
        Self {
            pos: self.pos + skipped,
            ..self
        }
    }

    /// Split at the first occurrence of `delim`.
    ///
    /// Returns the span before the delimiter and a cursor positioned just
    /// after it, or `None` if the delimiter does not occur.
    pub(crate) fn split_once(self, delim: u8) -> Option<(&'a [u8], Self)> {
        let rest = self.rest();
        let offset = rest.iter().position(|&b| b == delim)?;
        let span = &rest[..offset];
        Some((
            span,
            Self {
                pos: self.pos + offset + 1,
                ..self
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_within_bounds() {
        let cur = Cursor::new(b"PING");
        let cur = cur.advance(4).unwrap();
        assert!(cur.is_empty());
        assert_eq!(cur.rest(), b"");
        assert_eq!(cur.position(), 4);
    }

    #[test]
    fn test_advance_past_end() {
        assert!(Cursor::new(b"254").advance(4).is_none());
    }

    #[test]
    fn test_take_saturates() {
        let (span, cur) = Cursor::new(b"ab").take(5);
        assert_eq!(span, b"ab");
        assert!(cur.is_empty());

        let (span, cur) = Cursor::new(b"abc").take(1);
        assert_eq!(span, b"a");
        assert_eq!(cur.rest(), b"bc");
    }

    #[test]
    fn test_skip_while() {
        let cur = Cursor::new(b"   NICK").skip_while(|b| b == b' ');
        assert_eq!(cur.peek(), Some(b'N'));
        assert_eq!(cur.position(), 3);
    }

    #[test]
    fn test_split_once() {
        let (span, cur) = Cursor::new(b":irc.example.chat 254").split_once(b' ').unwrap();
        assert_eq!(span, b":irc.example.chat");
        assert_eq!(cur.rest(), b"254");

        assert!(Cursor::new(b"nospace").split_once(b' ').is_none());
    }

    #[test]
    fn test_split_once_at_end() {
        let (span, cur) = Cursor::new(b"abc ").split_once(b' ').unwrap();
        assert_eq!(span, b"abc");
        assert!(cur.is_empty());
    }
}
