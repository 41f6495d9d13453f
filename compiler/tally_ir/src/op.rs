//! Binary operators.
//!
//! The operator set is closed, so it is a plain enum dispatched by `match`
//! in the evaluator rather than stored as callables on the operand stack.

use std::fmt;

/// A binary operator in operator position of a group.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Op {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`, yielding zero when the divisor is zero.
    Div,
    /// `=`, storing the right value into the left cell.
    Assign,
}

impl Op {
    /// Every operator, in source-symbol order.
    pub const ALL: [Op; 5] = [Op::Add, Op::Sub, Op::Mul, Op::Div, Op::Assign];

    /// Map a source byte to its operator.
    #[inline]
    pub const fn from_byte(byte: u8) -> Option<Op> {
        match byte {
            b'+' => Some(Op::Add),
            b'-' => Some(Op::Sub),
            b'*' => Some(Op::Mul),
            b'/' => Some(Op::Div),
            b'=' => Some(Op::Assign),
            _ => None,
        }
    }

    /// The source symbol.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
            Op::Assign => '=',
        }
    }

    /// Human-readable name used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Op::Add => "add",
            Op::Sub => "subtract",
            Op::Mul => "multiply",
            Op::Div => "divide",
            Op::Assign => "assign",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
