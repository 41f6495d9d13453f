//! The interpreter context.
//!
//! One `Interpreter` is created per session. It owns the two-tier arena and
//! the variable store; nothing in the core reaches for global state.

use tally_ir::{Int, Limits, Memory, Tier, VariableStore};
use tally_parse::parse_line;
use tracing::debug;

use crate::errors::InterpretError;
use crate::evaluator::evaluate;

/// Session state: arena, variables and limits.
#[derive(Debug)]
pub struct Interpreter {
    memory: Memory,
    vars: VariableStore,
    limits: Limits,
}

impl Interpreter {
    pub fn new(limits: Limits) -> Self {
        Interpreter {
            memory: Memory::with_limits(&limits),
            vars: VariableStore::with_limits(&limits),
            limits,
        }
    }

    /// Interpret one line, returning the value of each root expression in
    /// source order.
    ///
    /// The transient tier is released before returning, whether or not the
    /// line succeeded. Variables keep their values across calls.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn run_line(&mut self, line: &str) -> Result<Vec<Int>, InterpretError> {
        let result = self.eval_line(line);
        self.memory.release_all_transient();
        result
    }

    fn eval_line(&mut self, line: &str) -> Result<Vec<Int>, InterpretError> {
        if line.len() > self.limits.max_line_len {
            return Err(InterpretError::LineTooLong {
                len: line.len(),
                max: self.limits.max_line_len,
            });
        }

        let roots = parse_line(line, &mut self.memory, &mut self.vars, &self.limits)?;
        debug!(
            roots = roots.len(),
            transient = self.memory.used(Tier::Transient),
            "parsed line"
        );

        let mut values = Vec::with_capacity(roots.len());
        for root in roots {
            let leaf = evaluate(root, &mut self.memory)?;
            values.push(self.memory.leaf_value(leaf).map_err(crate::EvalError::from)?);
        }
        Ok(values)
    }

    /// Current value of a variable, without creating it.
    pub fn lookup(&self, name: &str) -> Option<Int> {
        let leaf = self.vars.get(name)?;
        self.memory.leaf_value(leaf).ok()
    }

    /// Number of variables bound so far.
    pub fn variable_count(&self) -> usize {
        self.vars.len()
    }

    /// Read access to the arena, for inspection.
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// End the session, releasing the durable tier. Returns the slots freed.
    pub fn shutdown(mut self) -> usize {
        let freed = self.memory.release_all_durable();
        debug!(freed, variables = self.vars.len(), "interpreter shut down");
        freed
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}
