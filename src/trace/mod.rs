//! Trace IR: a straight-line, single-assignment program over registers.
//!
//! A [`Trace`] is produced by the [`Tracer`] and never mutated afterwards.
//! Every pass (`optimize.rs`, `rewrite.rs`) returns a fresh trace.
//!
//! # Invariants
//!
//! - every register is bound at most once (parameters included);
//! - an equation's operands reference only parameters or registers bound by
//!   strictly earlier equations;
//! - each equation's operand count matches its opcode's arity;
//! - a register return atom is a parameter or an equation binder.

use std::collections::HashSet;
use std::fmt::{self, Display};

use crate::error::{Error, Result};
use crate::insn::Instruction;
use crate::value::{Atom, VReg};

// Each submodule adds impl blocks to Trace.
mod optimize;
mod replay;
mod rewrite;
mod tracer;

pub use self::optimize::OptimizeParams;
pub use self::replay::Replay;
pub use self::rewrite::{Pattern, RewriteRule, Template, IDENTITY_RULES};
pub use self::tracer::Tracer;

/// Binds one register to the result of one instruction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equation {
    binder: VReg,
    rhs: Instruction<Atom>,
}

impl Equation {
    #[inline]
    pub fn new(binder: VReg, rhs: Instruction<Atom>) -> Self {
        Equation { binder, rhs }
    }

    #[inline]
    pub fn binder(&self) -> VReg {
        self.binder
    }

    #[inline]
    pub fn rhs(&self) -> &Instruction<Atom> {
        &self.rhs
    }

    /// Registers this equation reads.
    pub fn operand_regs(&self) -> impl Iterator<Item = VReg> + '_ {
        self.rhs.args().iter().filter_map(Atom::as_reg)
    }
}

impl Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.binder, self.rhs)
    }
}

/// A staged program: parameters, equations in topological order, and one
/// return atom.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    params: Vec<VReg>,
    equations: Vec<Equation>,
    ret: Atom,
}

impl Trace {
    /// Assemble a trace, checking the IR invariants.
    pub fn new(params: Vec<VReg>, equations: Vec<Equation>, ret: Atom) -> Result<Self> {
        let trace = Trace::from_parts(params, equations, ret);
        trace.validate()?;
        Ok(trace)
    }

    #[inline]
    pub(crate) fn from_parts(params: Vec<VReg>, equations: Vec<Equation>, ret: Atom) -> Self {
        Trace {
            params,
            equations,
            ret,
        }
    }

    #[inline]
    pub fn params(&self) -> &[VReg] {
        &self.params
    }

    #[inline]
    pub fn num_params(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    #[inline]
    pub fn num_equations(&self) -> usize {
        self.equations.len()
    }

    #[inline]
    pub fn return_atom(&self) -> Atom {
        self.ret
    }

    /// Check the IR invariants listed in the module docs.
    pub fn validate(&self) -> Result<()> {
        let mut bound: HashSet<VReg> = HashSet::with_capacity(self.params.len() + self.equations.len());
        for &p in &self.params {
            if !bound.insert(p) {
                return Err(Error::invariant(format!("parameter {p} is bound twice")));
            }
        }
        for (i, eqn) in self.equations.iter().enumerate() {
            eqn.rhs.check_arity()?;
            if let Some(r) = eqn.operand_regs().find(|r| !bound.contains(r)) {
                return Err(Error::invariant(format!(
                    "equation {i} reads {r} before it is bound"
                )));
            }
            if !bound.insert(eqn.binder) {
                return Err(Error::invariant(format!(
                    "equation {i} rebinds {}",
                    eqn.binder
                )));
            }
        }
        match self.ret {
            Atom::Reg(r) if !bound.contains(&r) => Err(Error::invariant(format!(
                "return register {r} is never bound"
            ))),
            _ => Ok(()),
        }
    }
}

/// Renders as
///
/// ```text
/// (define-function (VReg(x0))
/// 	00000: VReg(v1) = Insn(mul: Atom(VReg(x0)), Atom(VReg(x0)))
/// 	return VReg(v1)
/// )
/// ```
impl Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(define-function (")?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{p}")?;
        }
        f.write_str(")\n")?;
        for (i, eqn) in self.equations.iter().enumerate() {
            writeln!(f, "\t{i:05}: {eqn}")?;
        }
        match self.ret {
            Atom::Reg(r) => writeln!(f, "\treturn {r}")?,
            Atom::Lit(v) => writeln!(f, "\treturn {v}")?,
        }
        f.write_str(")")
    }
}
