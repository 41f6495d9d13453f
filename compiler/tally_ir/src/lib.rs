//! Tally IR - memory model for the Tally interpreter.
//!
//! This crate contains the data every other stage shares:
//! - Spans for locating errors inside a source line
//! - Operators (`Op`) as a closed enum instead of callable storage
//! - Expression nodes (`Node`) as a tagged Leaf/Internal variant
//! - The two-tier arena (`Memory`) backing all cells and nodes
//! - The variable store mapping identifiers to durable cells
//!
//! # Tiers
//!
//! Every allocation lands in one of two tiers:
//! - **Durable**: variable cells and the leaves wrapping them. Lives until
//!   the interpreter shuts down.
//! - **Transient**: literals, internal nodes and operator results. Bulk
//!   released after each line.
//!
//! Handles (`CellId`, `NodeId`) carry the generation of their tier, so a
//! handle that survives a bulk release is reported as stale instead of
//! aliasing newer storage.

mod ids;
mod limits;
mod memory;
mod node;
mod op;
mod span;
mod vars;

pub use ids::{CellId, NodeId, Tier};
pub use limits::Limits;
pub use memory::{Memory, MemoryError};
pub use node::Node;
pub use op::Op;
pub use span::Span;
pub use vars::{hash_identifier, VarError, VariableStore};

/// The integer type every cell holds.
///
/// Arithmetic on it wraps on overflow.
pub type Int = i32;
