//! Single-pass lexer over one line.
//!
//! Scans left to right with no backtracking:
//! - ASCII whitespace other than `\r` is skipped
//! - `\r` ends the line; anything after it is ignored
//! - `(` and `)` are group delimiters
//! - `+ - * / =` are operators (a sign is never part of a number)
//! - a digit starts a maximal run of digits, an unsigned decimal literal
//! - a letter starts a maximal run of letters and digits, an identifier
//!
//! Anything else is an error. The lexer stops after the first error.

use tally_ir::{Int, Op, Span};
use tracing::trace;

use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrorKind};

/// Token kinds.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TokenKind<'src> {
    LParen,
    RParen,
    Op(Op),
    /// Unsigned literal; accumulation wraps on overflow.
    Int(Int),
    Ident(&'src str),
}

/// A token and its location in the line.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind<'src>,
    pub span: Span,
}

/// Iterator of tokens over one line.
pub struct Lexer<'src> {
    source: &'src str,
    cursor: Cursor<'src>,
    failed: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            cursor: Cursor::new(source),
            failed: false,
        }
    }

    fn next_token(&mut self) -> Result<Option<Token<'src>>, ParseError> {
        self.cursor.eat_while(|b| b.is_ascii_whitespace() && b != b'\r');

        let start = self.cursor.pos();
        let Some(byte) = self.cursor.current().filter(|&b| b != b'\r') else {
            return Ok(None);
        };

        let kind = match byte {
            b'(' => {
                self.cursor.advance();
                TokenKind::LParen
            }
            b')' => {
                self.cursor.advance();
                TokenKind::RParen
            }
            b'0'..=b'9' => TokenKind::Int(self.literal(start)),
            b if b.is_ascii_alphabetic() => TokenKind::Ident(self.identifier(start)),
            b => match Op::from_byte(b) {
                Some(op) => {
                    self.cursor.advance();
                    TokenKind::Op(op)
                }
                None => return Err(self.unexpected(start)),
            },
        };

        let token = Token {
            kind,
            span: Span::from_range(start..self.cursor.pos()),
        };
        trace!(?token, "lexed");
        Ok(Some(token))
    }

    fn literal(&mut self, start: usize) -> Int {
        self.cursor.eat_while(|b| b.is_ascii_digit());
        self.cursor
            .slice_from(start)
            .iter()
            .fold(0, |value: Int, &b| {
                value.wrapping_mul(10).wrapping_add(Int::from(b - b'0'))
            })
    }

    fn identifier(&mut self, start: usize) -> &'src str {
        self.cursor.eat_while(|b| b.is_ascii_alphanumeric());
        // Only ASCII bytes were consumed, so both ends are char boundaries.
        &self.source[start..self.cursor.pos()]
    }

    fn unexpected(&self, start: usize) -> ParseError {
        let found = self.source[start..].chars().next().unwrap_or('\0');
        ParseError::new(
            ParseErrorKind::UnexpectedChar { found },
            Span::from_range(start..start + found.len_utf8()),
        )
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
