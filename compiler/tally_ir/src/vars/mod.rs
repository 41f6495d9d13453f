//! Variable store: identifiers bound to durable cells.
//!
//! A fixed number of buckets, each holding a chain of bindings in insertion
//! order. Bindings are created lazily with value zero and never removed.

use thiserror::Error;
use tracing::debug;

use crate::{Limits, Memory, MemoryError, NodeId, Tier};

/// Errors raised when binding an identifier.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum VarError {
    #[error("identifier `{name}` is {len} bytes long (maximum {max})")]
    TooLong { name: String, len: usize, max: usize },
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

impl VarError {
    /// Stable diagnostic code.
    pub const fn code(&self) -> &'static str {
        match self {
            VarError::TooLong { .. } => "E0004",
            VarError::Memory(err) => err.code(),
        }
    }
}

/// Polynomial rolling hash over an identifier's bytes.
///
/// Seeded with the first byte shifted left by 7, multiplied by 1000003 and
/// XORed with each byte, then XORed with the length. Arithmetic wraps in a
/// 64-bit signed accumulator; the result keeps the low 32 bits.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    reason = "the hash is defined as the low 32 bits of a signed 64-bit accumulator"
)]
pub fn hash_identifier(name: &[u8]) -> u32 {
    let Some(&first) = name.first() else {
        return 0;
    };
    let mut x = i64::from(first) << 7;
    for &byte in name {
        x = x.wrapping_mul(1_000_003) ^ i64::from(byte);
    }
    x ^= name.len() as i64;
    x as u32
}

#[derive(Debug)]
struct Binding {
    name: Box<str>,
    leaf: NodeId,
}

/// Process-wide identifier table, owned by the interpreter.
#[derive(Debug)]
pub struct VariableStore {
    buckets: Box<[Vec<Binding>]>,
    max_ident_len: usize,
    len: usize,
}

impl VariableStore {
    /// Create an empty store with `bucket_count` buckets (at least one).
    pub fn new(bucket_count: usize, max_ident_len: usize) -> Self {
        let buckets = (0..bucket_count.max(1)).map(|_| Vec::new()).collect();
        VariableStore {
            buckets,
            max_ident_len,
            len: 0,
        }
    }

    /// Create an empty store sized by `limits`.
    pub fn with_limits(limits: &Limits) -> Self {
        Self::new(limits.variable_buckets, limits.max_ident_len)
    }

    /// Bucket index for `name`.
    pub fn bucket_of(&self, name: &str) -> usize {
        hash_identifier(name.as_bytes()) as usize % self.buckets.len()
    }

    /// Return the durable leaf bound to `name`, creating a zero-valued
    /// binding on first use.
    pub fn lookup_or_create(
        &mut self,
        name: &str,
        memory: &mut Memory,
    ) -> Result<NodeId, VarError> {
        if name.len() > self.max_ident_len {
            return Err(VarError::TooLong {
                name: name.to_owned(),
                len: name.len(),
                max: self.max_ident_len,
            });
        }

        let bucket = self.bucket_of(name);
        let chain = &mut self.buckets[bucket];
        if let Some(binding) = chain.iter().find(|b| &*b.name == name) {
            return Ok(binding.leaf);
        }

        let leaf = memory.alloc_leaf(Tier::Durable, 0)?;
        chain.push(Binding {
            name: name.into(),
            leaf,
        });
        self.len += 1;
        debug!(name, bucket, "bound new variable");
        Ok(leaf)
    }

    /// Look up an existing binding without creating one.
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.buckets[self.bucket_of(name)]
            .iter()
            .find(|b| &*b.name == name)
            .map(|b| b.leaf)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for VariableStore {
    fn default() -> Self {
        Self::with_limits(&Limits::default())
    }
}

#[cfg(test)]
mod tests;
