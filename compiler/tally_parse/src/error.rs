//! Parse errors.
//!
//! Every error carries the span of the offending input so the driver can
//! underline it. All of them stop interpretation of the line.

use tally_ir::{MemoryError, Span, VarError};
use thiserror::Error;

/// A parse error located in the current line.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{kind} at {span}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

/// What went wrong while tokenizing or assembling the tree.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseErrorKind {
    // === Lexical ===
    #[error("unrecognized character `{found}`")]
    UnexpectedChar { found: char },
    #[error("identifier is {len} bytes long (maximum {max})")]
    IdentifierTooLong { len: usize, max: usize },

    // === Structural ===
    #[error("`)` needs four pending stack entries, found {depth}")]
    StackUnderflow { depth: usize },
    #[error("expected an operand before `)`")]
    ExpectedOperand,
    #[error("expected an operator after `(`")]
    ExpectedOperator,
    #[error("group is missing its `(`")]
    MissingGroupOpen,
    #[error("unclosed `(`")]
    UnclosedGroup,
    #[error("operator `{op}` outside of a group")]
    DanglingOperator { op: tally_ir::Op },
    #[error("operand stack full ({capacity} entries)")]
    StackOverflow { capacity: usize },

    // === Memory ===
    #[error(transparent)]
    Memory(MemoryError),
}

impl ParseErrorKind {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorKind::UnexpectedChar { .. } => "E0002",
            ParseErrorKind::IdentifierTooLong { .. } => "E0004",
            ParseErrorKind::StackUnderflow { .. } => "E1001",
            ParseErrorKind::ExpectedOperand => "E1002",
            ParseErrorKind::ExpectedOperator => "E1003",
            ParseErrorKind::MissingGroupOpen => "E1004",
            ParseErrorKind::UnclosedGroup => "E1005",
            ParseErrorKind::DanglingOperator { .. } => "E1006",
            ParseErrorKind::StackOverflow { .. } => "E1007",
            ParseErrorKind::Memory(err) => err.code(),
        }
    }
}

impl From<VarError> for ParseErrorKind {
    fn from(err: VarError) -> Self {
        match err {
            VarError::TooLong { len, max, .. } => ParseErrorKind::IdentifierTooLong { len, max },
            VarError::Memory(err) => ParseErrorKind::Memory(err),
        }
    }
}

impl From<MemoryError> for ParseErrorKind {
    fn from(err: MemoryError) -> Self {
        ParseErrorKind::Memory(err)
    }
}
