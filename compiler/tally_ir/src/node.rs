//! Expression nodes.

use crate::{CellId, NodeId, Op};

/// An expression tree node.
///
/// A node is either a pure leaf wrapping one integer cell, or a pure
/// internal node with an operator and exactly two children. Mixed shapes
/// cannot be represented.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Node {
    /// Wraps a cell. Variable leaves wrap the durable cell directly.
    Leaf(CellId),
    /// `(op left right)` with children in source order.
    Internal { op: Op, left: NodeId, right: NodeId },
}
