//! Evaluation and interpreter errors.

use tally_ir::{MemoryError, Span};
use tally_parse::ParseError;
use thiserror::Error;

/// Result type for evaluation.
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors raised while reducing a tree.
///
/// Division by zero is not an error: it yields zero.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum EvalError {
    /// Stale handle, malformed node or exhausted tier.
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

impl EvalError {
    /// Stable diagnostic code.
    pub const fn code(&self) -> &'static str {
        match self {
            EvalError::Memory(err) => err.code(),
        }
    }
}

/// Errors raised while interpreting a line. Each one stops the session.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum InterpretError {
    #[error("line is {len} bytes long (maximum {max})")]
    LineTooLong { len: usize, max: usize },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl InterpretError {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            InterpretError::LineTooLong { .. } => "E0001",
            InterpretError::Parse(err) => err.code(),
            InterpretError::Eval(err) => err.code(),
        }
    }

    /// Location in the line, when the error has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            InterpretError::Parse(err) => Some(err.span),
            InterpretError::LineTooLong { max, len } => Some(Span::from_range(*max..*len)),
            InterpretError::Eval(_) => None,
        }
    }
}
