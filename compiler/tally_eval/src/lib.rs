//! Tally Eval - evaluator and interpreter context.
//!
//! # Architecture
//!
//! - `evaluate`: recursive reduction of a tree to a leaf
//! - `apply`: direct enum-based dispatch of the five operators
//! - `Interpreter`: owns the arena, the variable store and the limits, and
//!   runs one line at a time (parse, evaluate, read results, release the
//!   transient tier)

mod errors;
mod evaluator;
mod interpreter;
mod operators;

pub use errors::{EvalError, EvalResult, InterpretError};
pub use evaluator::evaluate;
pub use interpreter::Interpreter;
pub use operators::{apply, evaluate_binary};
