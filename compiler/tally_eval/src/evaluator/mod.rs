//! Recursive tree evaluation.
//!
//! Tree depth grows with the configured line length, so each level checks
//! the remaining native stack and moves onto a fresh segment when it runs
//! low. WASM manages its own stack and recurses directly.

use tally_ir::{Memory, Node, NodeId};

use crate::errors::EvalResult;
use crate::operators::apply;

/// Free stack below which a level switches to a new segment.
#[cfg(not(target_arch = "wasm32"))]
const STACK_RED_ZONE: usize = 64 * 1024;

/// Size of each new stack segment.
#[cfg(not(target_arch = "wasm32"))]
const STACK_SEGMENT: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Reduce `node` to a leaf.
///
/// A leaf is returned unchanged. An internal node evaluates its left child,
/// then its right child, then applies its operator to the two resulting
/// leaves, returning the fresh transient leaf the operator produced.
///
/// The tree itself is never modified; assignment may change a cell.
pub fn evaluate(node: NodeId, memory: &mut Memory) -> EvalResult<NodeId> {
    with_stack(|| -> EvalResult<NodeId> {
        match memory.node(node)? {
            Node::Leaf(_) => Ok(node),
            Node::Internal { op, left, right } => {
                let left = evaluate(left, memory)?;
                let right = evaluate(right, memory)?;
                apply(op, left, right, memory)
            }
        }
    })
}
