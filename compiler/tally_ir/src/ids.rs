//! Handles into the two-tier arena.
//!
//! A handle records which tier it came from, the tier generation at
//! allocation time, and the slot index. Only `Memory` mints handles.

use std::fmt;

/// Which arena tier an allocation belongs to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Tier {
    /// Lives until the interpreter shuts down (variables).
    Durable,
    /// Lives for one input line (literals, internal nodes, results).
    Transient,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Durable => f.write_str("durable"),
            Tier::Transient => f.write_str("transient"),
        }
    }
}

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash)]
        pub struct $name {
            tier: Tier,
            generation: u32,
            index: u32,
        }

        impl $name {
            #[inline]
            pub(crate) const fn new(tier: Tier, generation: u32, index: u32) -> Self {
                $name {
                    tier,
                    generation,
                    index,
                }
            }

            /// Tier the handle points into.
            #[inline]
            pub const fn tier(self) -> Tier {
                self.tier
            }

            /// Generation of the tier when the handle was minted.
            #[inline]
            pub const fn generation(self) -> u32 {
                self.generation
            }

            /// Slot index within the tier.
            #[inline]
            pub const fn index(self) -> usize {
                self.index as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "{}({}:{}#{})",
                    $label, self.tier, self.index, self.generation
                )
            }
        }
    };
}

define_handle!(
    /// Handle to an integer cell.
    CellId,
    "CellId"
);

define_handle!(
    /// Handle to an expression node.
    NodeId,
    "NodeId"
);
