//! Stack-based tree builder.
//!
//! A single bounded stack holds group markers, operators and operands.
//! `(` pushes a marker, operators push themselves, literals and identifiers
//! push leaves. On `)` the top four entries must be, from the top down:
//! right operand, left operand, operator, group marker. They are replaced
//! by one internal node. Whatever remains at end of line are the roots,
//! bottom to top.

use tally_ir::{Memory, Node, NodeId, Op, Span, Tier, VariableStore};
use tracing::trace;

use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{Token, TokenKind};

/// One entry on the operand/operator stack.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StackEntry {
    GroupOpen(Span),
    Operator(Op, Span),
    Operand(NodeId, Span),
}

impl StackEntry {
    pub fn span(&self) -> Span {
        match self {
            StackEntry::GroupOpen(span)
            | StackEntry::Operator(_, span)
            | StackEntry::Operand(_, span) => *span,
        }
    }
}

/// Assembles expression trees from tokens.
///
/// Literals and internal nodes go into the transient tier; identifiers
/// resolve to the durable leaves owned by the variable store.
pub struct TreeBuilder<'a> {
    memory: &'a mut Memory,
    vars: &'a mut VariableStore,
    stack: Vec<StackEntry>,
    capacity: usize,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(memory: &'a mut Memory, vars: &'a mut VariableStore, capacity: usize) -> Self {
        TreeBuilder {
            memory,
            vars,
            stack: Vec::with_capacity(capacity.min(256)),
            capacity,
        }
    }

    /// Feed one token.
    pub fn push_token(&mut self, token: Token<'_>) -> Result<(), ParseError> {
        let span = token.span;
        match token.kind {
            TokenKind::LParen => self.push(StackEntry::GroupOpen(span)),
            TokenKind::Op(op) => self.push(StackEntry::Operator(op, span)),
            TokenKind::Int(value) => {
                let leaf = self
                    .memory
                    .alloc_leaf(Tier::Transient, value)
                    .map_err(|err| ParseError::new(err.into(), span))?;
                self.push(StackEntry::Operand(leaf, span))
            }
            TokenKind::Ident(name) => {
                let leaf = self
                    .vars
                    .lookup_or_create(name, self.memory)
                    .map_err(|err| ParseError::new(err.into(), span))?;
                self.push(StackEntry::Operand(leaf, span))
            }
            TokenKind::RParen => self.close_group(span),
        }
    }

    fn push(&mut self, entry: StackEntry) -> Result<(), ParseError> {
        if self.stack.len() >= self.capacity {
            return Err(ParseError::new(
                ParseErrorKind::StackOverflow {
                    capacity: self.capacity,
                },
                entry.span(),
            ));
        }
        self.stack.push(entry);
        Ok(())
    }

    fn close_group(&mut self, close: Span) -> Result<(), ParseError> {
        let depth = self.stack.len();
        if depth < 4 {
            return Err(ParseError::new(
                ParseErrorKind::StackUnderflow { depth },
                close,
            ));
        }

        let right = self.pop_operand(close)?;
        let left = self.pop_operand(close)?;
        let op = match self.pop(close)? {
            StackEntry::Operator(op, _) => op,
            other => {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedOperator,
                    other.span(),
                ))
            }
        };
        let open = match self.pop(close)? {
            StackEntry::GroupOpen(span) => span,
            other => {
                return Err(ParseError::new(
                    ParseErrorKind::MissingGroupOpen,
                    other.span(),
                ))
            }
        };

        let span = open.merge(close);
        let node = Node::Internal { op, left, right };
        let id = self
            .memory
            .alloc_node(Tier::Transient, node)
            .map_err(|err| ParseError::new(err.into(), span))?;
        trace!(%op, ?id, "closed group");
        self.push(StackEntry::Operand(id, span))
    }

    fn pop(&mut self, close: Span) -> Result<StackEntry, ParseError> {
        self.stack.pop().ok_or_else(|| {
            ParseError::new(ParseErrorKind::StackUnderflow { depth: 0 }, close)
        })
    }

    fn pop_operand(&mut self, close: Span) -> Result<NodeId, ParseError> {
        match self.pop(close)? {
            StackEntry::Operand(id, _) => Ok(id),
            other => Err(ParseError::new(
                ParseErrorKind::ExpectedOperand,
                other.span(),
            )),
        }
    }

    /// End of line: every remaining entry must be a complete expression.
    pub fn finish(self) -> Result<Vec<NodeId>, ParseError> {
        self.stack
            .into_iter()
            .map(|entry| match entry {
                StackEntry::Operand(id, _) => Ok(id),
                StackEntry::GroupOpen(span) => {
                    Err(ParseError::new(ParseErrorKind::UnclosedGroup, span))
                }
                StackEntry::Operator(op, span) => Err(ParseError::new(
                    ParseErrorKind::DanglingOperator { op },
                    span,
                )),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests;
