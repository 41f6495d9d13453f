//! Capacity limits for a single interpreter.
//!
//! Every bounded structure takes its size from here, so a whole session can
//! be tuned (or shrunk in tests) from one value.

/// Capacity configuration for an interpreter session.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Limits {
    /// Longest accepted input line, in bytes.
    pub max_line_len: usize,
    /// Operand/operator stack entries per line.
    pub stack_capacity: usize,
    /// Longest accepted identifier, in bytes.
    pub max_ident_len: usize,
    /// Hash buckets in the variable store.
    pub variable_buckets: usize,
    /// Slots in the durable tier (two per variable: cell and leaf).
    pub durable_slots: usize,
    /// Slots in the transient tier, reset after every line.
    pub transient_slots: usize,
}

impl Limits {
    pub const DEFAULT_MAX_LINE_LEN: usize = 256;
    pub const DEFAULT_STACK_CAPACITY: usize = 256;
    pub const DEFAULT_MAX_IDENT_LEN: usize = 31;
    pub const DEFAULT_VARIABLE_BUCKETS: usize = 1024;
    pub const DEFAULT_DURABLE_SLOTS: usize = 1 << 16;
    pub const DEFAULT_TRANSIENT_SLOTS: usize = 4096;
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_line_len: Self::DEFAULT_MAX_LINE_LEN,
            stack_capacity: Self::DEFAULT_STACK_CAPACITY,
            max_ident_len: Self::DEFAULT_MAX_IDENT_LEN,
            variable_buckets: Self::DEFAULT_VARIABLE_BUCKETS,
            durable_slots: Self::DEFAULT_DURABLE_SLOTS,
            transient_slots: Self::DEFAULT_TRANSIENT_SLOTS,
        }
    }
}
