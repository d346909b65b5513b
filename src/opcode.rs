//! Primitive opcodes and their numeric semantics.
//!
//! Every [`OpCode`] has a fixed arity. [`eval_numeric`] evaluates a single
//! opcode over any float type; the direct evaluator and constant folding
//! both go through it.

use std::fmt::{self, Display};
use std::str::FromStr;

use num_traits::Float;

use crate::error::{Error, Result};

/// The closed vocabulary of primitive operations.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OpCode {
    // ── Binary arithmetic ──
    Add,
    Mul,

    // ── Selection ──
    /// `iif(c, t, f)`: `t` if `c` is truthy, else `f`.
    Iif,

    // ── Structural ──
    /// Identity. In a trace, an `id` equation is an alias.
    Id,
}

impl OpCode {
    /// Every opcode, in declaration order.
    pub const ALL: [OpCode; 4] = [OpCode::Add, OpCode::Mul, OpCode::Iif, OpCode::Id];

    /// Number of operands this opcode takes.
    #[inline]
    pub fn arity(self) -> usize {
        match self {
            OpCode::Add | OpCode::Mul => 2,
            OpCode::Iif => 3,
            OpCode::Id => 1,
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            OpCode::Add => "add",
            OpCode::Mul => "mul",
            OpCode::Iif => "iif",
            OpCode::Id => "id",
        }
    }

    /// Fails with [`Error::Arity`] unless `actual` equals this opcode's arity.
    #[inline]
    pub fn check_arity(self, actual: usize) -> Result<()> {
        if actual == self.arity() {
            Ok(())
        } else {
            Err(Error::arity(self.name(), self.arity(), actual))
        }
    }
}

impl Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OpCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        OpCode::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| Error::operation(s, "unrecognized opcode"))
    }
}

/// Truthiness of an `iif` condition: nonzero and not NaN.
#[inline]
pub fn is_truthy<T: Float>(c: T) -> bool {
    !c.is_zero() && !c.is_nan()
}

/// Evaluate a single opcode on concrete operands.
///
/// Fails with [`Error::Arity`] if `args.len()` differs from `op.arity()`.
#[inline]
pub fn eval_numeric<T: Float>(op: OpCode, args: &[T]) -> Result<T> {
    op.check_arity(args.len())?;
    let value = match (op, args) {
        (OpCode::Add, &[x, y]) => x + y,
        (OpCode::Mul, &[x, y]) => x * y,
        (OpCode::Iif, &[c, t, f]) => {
            if is_truthy(c) {
                t
            } else {
                f
            }
        }
        (OpCode::Id, &[v]) => v,
        _ => return Err(Error::arity(op.name(), op.arity(), args.len())),
    };
    Ok(value)
}
