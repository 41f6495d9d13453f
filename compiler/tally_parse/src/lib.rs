//! Tally Parse - tokenizer and tree builder.
//!
//! Turns one line of source into the root expressions it contains, in
//! source order. There is no grammar-driven parser: the [`TreeBuilder`]
//! keeps an explicit operand/operator stack and folds a group every time a
//! `)` arrives.
//!
//! # Example
//!
//! ```
//! use tally_ir::{Limits, Memory, VariableStore};
//!
//! let limits = Limits::default();
//! let mut memory = Memory::with_limits(&limits);
//! let mut vars = VariableStore::with_limits(&limits);
//! let roots = tally_parse::parse_line("(+ 1 2) x", &mut memory, &mut vars, &limits);
//! assert_eq!(roots.map(|r| r.len()), Ok(2));
//! ```

mod builder;
mod cursor;
mod error;
mod lexer;

pub use builder::{StackEntry, TreeBuilder};
pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind};
pub use lexer::{Lexer, Token, TokenKind};

use tally_ir::{Limits, Memory, NodeId, VariableStore};

/// Parse one line into its root expressions.
///
/// Literal leaves and internal nodes are allocated in the transient tier of
/// `memory`; identifiers are bound (and created on first use) in `vars`.
#[tracing::instrument(level = "trace", skip(memory, vars, limits))]
pub fn parse_line(
    line: &str,
    memory: &mut Memory,
    vars: &mut VariableStore,
    limits: &Limits,
) -> Result<Vec<NodeId>, ParseError> {
    let mut builder = TreeBuilder::new(memory, vars, limits.stack_capacity);
    for token in Lexer::new(line) {
        builder.push_token(token?)?;
    }
    builder.finish()
}
