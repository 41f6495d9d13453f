//! Operator implementations.
//!
//! Direct enum-based dispatch: the operator set is closed, so a `match` on
//! [`Op`] replaces any table of callables. Every operator produces a fresh
//! transient leaf holding its result.

use tally_ir::{Int, Memory, NodeId, Op, Tier};
use tracing::trace;

use crate::errors::EvalResult;

/// Apply `op` to two evaluated leaves.
///
/// `left` and `right` are the source-order operands: `(- 3 4)` computes
/// `3 - 4`, and `(= x 5)` writes 5 into the cell behind `x`. Cells are read
/// here, after both operands have been evaluated.
pub fn apply(op: Op, left: NodeId, right: NodeId, memory: &mut Memory) -> EvalResult<NodeId> {
    let left_cell = memory.leaf_cell(left)?;
    let a = memory.cell(left_cell)?;
    let b = memory.leaf_value(right)?;

    let result = match op {
        Op::Assign => {
            // Writes through to whichever cell the leaf wraps; for a
            // variable that is its durable cell.
            memory.set_cell(left_cell, b)?;
            b
        }
        _ => evaluate_binary(a, b, op),
    };

    trace!(op = op.name(), a, b, result, "applied operator");
    Ok(memory.alloc_leaf(Tier::Transient, result)?)
}

/// Integer arithmetic for the value-producing operators.
///
/// Wraps on overflow. Division truncates toward zero and yields zero for a
/// zero divisor. `Assign` has no arithmetic meaning and returns `b`.
pub fn evaluate_binary(a: Int, b: Int, op: Op) -> Int {
    match op {
        Op::Add => a.wrapping_add(b),
        Op::Sub => a.wrapping_sub(b),
        Op::Mul => a.wrapping_mul(b),
        Op::Div => {
            if b == 0 {
                b
            } else {
                a.wrapping_div(b)
            }
        }
        Op::Assign => b,
    }
}
