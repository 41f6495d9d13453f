//! Byte cursor over one source line.
//!
//! The cursor is [`Copy`], so the lexer can snapshot a start position and
//! slice the scanned run afterwards. End of line is `None` from
//! [`Cursor::current`].

/// Forward-only cursor over the bytes of a line.
#[derive(Copy, Clone, Debug)]
pub struct Cursor<'src> {
    bytes: &'src [u8],
    pos: usize,
}

impl<'src> Cursor<'src> {
    /// Create a cursor at position 0.
    pub fn new(source: &'src str) -> Self {
        Cursor {
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The byte at the current position, or `None` at end of line.
    #[inline]
    pub fn current(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Advance by one byte. No-op at end of line.
    #[inline]
    pub fn advance(&mut self) {
        if !self.is_eof() {
            self.pos += 1;
        }
    }

    /// Advance past every byte matching `pred`, returning how many were consumed.
    #[inline]
    pub fn eat_while(&mut self, mut pred: impl FnMut(u8) -> bool) -> usize {
        let start = self.pos;
        while let Some(byte) = self.current() {
            if !pred(byte) {
                break;
            }
            self.pos += 1;
        }
        self.pos - start
    }

    /// Bytes from `start` up to the current position.
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'src [u8] {
        &self.bytes[start.min(self.pos)..self.pos]
    }
}
