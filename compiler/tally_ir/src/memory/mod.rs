//! Two-tier arena backing every cell and node.
//!
//! Each tier is a bounded registry of allocations. Nothing is freed
//! individually: a tier is released in bulk, which empties its registry and
//! advances its generation so outstanding handles become stale.
//!
//! # Tiers
//!
//! - **Durable**: variable cells and their leaves; released once at shutdown.
//! - **Transient**: everything built while interpreting one line; released
//!   after that line's results have been read.

use thiserror::Error;
use tracing::{debug, trace};

use crate::{CellId, Int, Limits, Node, NodeId, Tier};

/// Errors raised by the arena.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum MemoryError {
    /// A tier ran out of slots.
    #[error("{tier} arena exhausted ({capacity} slots)")]
    Exhausted { tier: Tier, capacity: usize },
    /// A handle outlived the bulk release of its tier.
    #[error("stale {tier} handle from generation {generation} (current {current})")]
    Stale {
        tier: Tier,
        generation: u32,
        current: u32,
    },
    /// A handle points past the live allocations of its tier.
    #[error("dangling {tier} handle at slot {index}")]
    Dangling { tier: Tier, index: usize },
    /// A leaf was required but the node is internal.
    #[error("{tier} node at slot {index} is not a leaf")]
    NotLeaf { tier: Tier, index: usize },
}

impl MemoryError {
    /// Stable diagnostic code.
    pub const fn code(&self) -> &'static str {
        match self {
            MemoryError::Exhausted { .. } => "E9001",
            MemoryError::Stale { .. } => "E9002",
            MemoryError::Dangling { .. } => "E9003",
            MemoryError::NotLeaf { .. } => "E9004",
        }
    }
}

/// One tier: a bounded registry of cells and nodes sharing a slot budget.
#[derive(Debug)]
struct TierArena {
    tier: Tier,
    cells: Vec<Int>,
    nodes: Vec<Node>,
    capacity: usize,
    generation: u32,
}

impl TierArena {
    fn new(tier: Tier, capacity: usize) -> Self {
        TierArena {
            tier,
            cells: Vec::new(),
            nodes: Vec::new(),
            capacity,
            generation: 0,
        }
    }

    #[inline]
    fn used(&self) -> usize {
        self.cells.len() + self.nodes.len()
    }

    fn exhausted(&self) -> MemoryError {
        MemoryError::Exhausted {
            tier: self.tier,
            capacity: self.capacity,
        }
    }

    /// Fail unless `slots` more slots fit.
    fn reserve(&self, slots: usize) -> Result<(), MemoryError> {
        if self.capacity.saturating_sub(self.used()) < slots {
            return Err(self.exhausted());
        }
        Ok(())
    }

    /// Claim one slot, returning its index within `len`.
    fn claim(&self, len: usize) -> Result<u32, MemoryError> {
        self.reserve(1)?;
        u32::try_from(len).map_err(|_| self.exhausted())
    }

    fn alloc_cell(&mut self, value: Int) -> Result<CellId, MemoryError> {
        let index = self.claim(self.cells.len())?;
        self.cells.push(value);
        Ok(CellId::new(self.tier, self.generation, index))
    }

    fn alloc_node(&mut self, node: Node) -> Result<NodeId, MemoryError> {
        let index = self.claim(self.nodes.len())?;
        self.nodes.push(node);
        Ok(NodeId::new(self.tier, self.generation, index))
    }

    /// Validate a handle's generation and index against `len` live slots.
    fn check(&self, generation: u32, index: usize, len: usize) -> Result<usize, MemoryError> {
        if generation != self.generation {
            return Err(MemoryError::Stale {
                tier: self.tier,
                generation,
                current: self.generation,
            });
        }
        if index >= len {
            return Err(MemoryError::Dangling {
                tier: self.tier,
                index,
            });
        }
        Ok(index)
    }

    /// Free everything and start a new generation. Returns the slots freed.
    fn release_all(&mut self) -> usize {
        let freed = self.used();
        self.cells.clear();
        self.nodes.clear();
        self.generation = self.generation.wrapping_add(1);
        debug!(tier = %self.tier, freed, generation = self.generation, "released arena tier");
        freed
    }
}

/// The two arena tiers, owned by one interpreter.
#[derive(Debug)]
pub struct Memory {
    durable: TierArena,
    transient: TierArena,
}

impl Memory {
    /// Create a memory with the given slot capacities.
    pub fn new(durable_slots: usize, transient_slots: usize) -> Self {
        Memory {
            durable: TierArena::new(Tier::Durable, durable_slots),
            transient: TierArena::new(Tier::Transient, transient_slots),
        }
    }

    /// Create a memory sized by `limits`.
    pub fn with_limits(limits: &Limits) -> Self {
        Self::new(limits.durable_slots, limits.transient_slots)
    }

    #[inline]
    fn arena(&self, tier: Tier) -> &TierArena {
        match tier {
            Tier::Durable => &self.durable,
            Tier::Transient => &self.transient,
        }
    }

    #[inline]
    fn arena_mut(&mut self, tier: Tier) -> &mut TierArena {
        match tier {
            Tier::Durable => &mut self.durable,
            Tier::Transient => &mut self.transient,
        }
    }

    // ===== Allocation =====

    /// Allocate a cell holding `value`.
    pub fn alloc_cell(&mut self, tier: Tier, value: Int) -> Result<CellId, MemoryError> {
        self.arena_mut(tier).alloc_cell(value)
    }

    /// Allocate a zero-initialised cell.
    pub fn alloc_zeroed_cell(&mut self, tier: Tier) -> Result<CellId, MemoryError> {
        self.alloc_cell(tier, 0)
    }

    /// Allocate a node.
    pub fn alloc_node(&mut self, tier: Tier, node: Node) -> Result<NodeId, MemoryError> {
        let id = self.arena_mut(tier).alloc_node(node)?;
        trace!(?id, ?node, "allocated node");
        Ok(id)
    }

    /// Allocate a cell holding `value` and a leaf wrapping it.
    ///
    /// Both slots are checked up front, so a failure leaves the tier as it was.
    pub fn alloc_leaf(&mut self, tier: Tier, value: Int) -> Result<NodeId, MemoryError> {
        self.arena(tier).reserve(2)?;
        let cell = self.alloc_cell(tier, value)?;
        self.alloc_node(tier, Node::Leaf(cell))
    }

    // ===== Access =====

    /// Read a cell.
    pub fn cell(&self, id: CellId) -> Result<Int, MemoryError> {
        let arena = self.arena(id.tier());
        let index = arena.check(id.generation(), id.index(), arena.cells.len())?;
        Ok(arena.cells[index])
    }

    /// Overwrite a cell.
    pub fn set_cell(&mut self, id: CellId, value: Int) -> Result<(), MemoryError> {
        let arena = self.arena_mut(id.tier());
        let index = arena.check(id.generation(), id.index(), arena.cells.len())?;
        arena.cells[index] = value;
        Ok(())
    }

    /// Read a node.
    pub fn node(&self, id: NodeId) -> Result<Node, MemoryError> {
        let arena = self.arena(id.tier());
        let index = arena.check(id.generation(), id.index(), arena.nodes.len())?;
        Ok(arena.nodes[index])
    }

    /// The cell wrapped by a leaf node.
    pub fn leaf_cell(&self, id: NodeId) -> Result<CellId, MemoryError> {
        match self.node(id)? {
            Node::Leaf(cell) => Ok(cell),
            Node::Internal { .. } => Err(MemoryError::NotLeaf {
                tier: id.tier(),
                index: id.index(),
            }),
        }
    }

    /// Read the value of a leaf node.
    pub fn leaf_value(&self, id: NodeId) -> Result<Int, MemoryError> {
        self.cell(self.leaf_cell(id)?)
    }

    // ===== Bulk release =====

    /// Free every durable allocation. Only called at shutdown.
    pub fn release_all_durable(&mut self) -> usize {
        self.durable.release_all()
    }

    /// Free every transient allocation. Called after each line.
    pub fn release_all_transient(&mut self) -> usize {
        self.transient.release_all()
    }

    // ===== Introspection =====

    /// Slots currently in use in `tier`.
    pub fn used(&self, tier: Tier) -> usize {
        self.arena(tier).used()
    }

    /// Slot capacity of `tier`.
    pub fn capacity(&self, tier: Tier) -> usize {
        self.arena(tier).capacity
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::with_limits(&Limits::default())
    }
}
