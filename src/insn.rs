//! Instructions and their constructors.

use std::fmt::{self, Display};

use crate::error::Result;
use crate::opcode::OpCode;
use crate::value::Value;

/// One primitive operation application: an opcode and its operands.
///
/// Suspended instructions carry [`Value`] operands; trace equations carry
/// [`Atom`](crate::value::Atom) operands.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction<A = Value> {
    op: OpCode,
    args: Vec<A>,
}

impl<A> Instruction<A> {
    /// Build an instruction. The operand count is not checked here; drivers
    /// check it with [`check_arity`](Self::check_arity).
    #[inline]
    pub fn new(op: OpCode, args: Vec<A>) -> Self {
        Instruction { op, args }
    }

    #[inline]
    pub fn op(&self) -> OpCode {
        self.op
    }

    #[inline]
    pub fn args(&self) -> &[A] {
        &self.args
    }

    #[inline]
    pub fn into_args(self) -> Vec<A> {
        self.args
    }

    #[inline]
    pub fn check_arity(&self) -> Result<()> {
        self.op.check_arity(self.args.len())
    }

    /// Rewrite every operand, stopping at the first error.
    pub fn try_map<B>(self, f: impl FnMut(A) -> Result<B>) -> Result<Instruction<B>> {
        let args = self.args.into_iter().map(f).collect::<Result<Vec<B>>>()?;
        Ok(Instruction { op: self.op, args })
    }
}

impl Instruction<Value> {
    /// Build an instruction from an opcode name such as `"mul"`.
    ///
    /// Fails with [`Error::Operation`](crate::Error::Operation) for an
    /// unknown name.
    pub fn from_name(name: &str, args: Vec<Value>) -> Result<Self> {
        Ok(Instruction::new(name.parse()?, args))
    }
}

impl<A: Display> Display for Instruction<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Insn({}: ", self.op)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

pub fn add(x: impl Into<Value>, y: impl Into<Value>) -> Instruction {
    Instruction::new(OpCode::Add, vec![x.into(), y.into()])
}

pub fn mul(x: impl Into<Value>, y: impl Into<Value>) -> Instruction {
    Instruction::new(OpCode::Mul, vec![x.into(), y.into()])
}

pub fn iif(
    condition: impl Into<Value>,
    consequent: impl Into<Value>,
    alternative: impl Into<Value>,
) -> Instruction {
    Instruction::new(
        OpCode::Iif,
        vec![condition.into(), consequent.into(), alternative.into()],
    )
}

pub fn id(value: impl Into<Value>) -> Instruction {
    Instruction::new(OpCode::Id, vec![value.into()])
}
