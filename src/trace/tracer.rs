use tracing::debug;

use crate::error::{Error, Result};
use crate::insn::Instruction;
use crate::interpreter::{Computation, Interpreter};
use crate::value::{fresh_namespace, RegKind, VReg, Value};

use super::{Equation, Trace};

/// Staging interpreter: records every instruction as an equation and
/// resumes the computation with the equation's register.
///
/// Parameters and equation results share one counter, so a unary trace
/// names its parameter `x0` and its first equation `v1`.
pub struct Tracer {
    namespace: u32,
    counter: u32,
    equations: Vec<Equation>,
}

impl Tracer {
    /// A tracer with its own register namespace.
    pub fn new() -> Self {
        Tracer {
            namespace: fresh_namespace(),
            counter: 0,
            equations: Vec::new(),
        }
    }

    #[inline]
    fn fresh(&mut self, kind: RegKind) -> VReg {
        let r = VReg::new(self.namespace, self.counter, kind);
        self.counter += 1;
        r
    }

    /// Drive `f` with `arity` fresh parameter registers and return the
    /// recorded trace.
    pub fn trace<C: Computation + ?Sized>(mut self, f: &C, arity: usize) -> Result<Trace> {
        let params: Vec<VReg> = (0..arity).map(|_| self.fresh(RegKind::Param)).collect();
        let args: Vec<Value> = params.iter().copied().map(Value::Reg).collect();

        let out = f.run(&mut self, &args)?;
        let ret = out.to_atom().ok_or_else(|| {
            Error::invariant(format!(
                "traced computation completed with {out}, which is not an atom"
            ))
        })?;

        let trace = Trace::new(params, self.equations, ret)?;
        debug!(
            params = trace.num_params(),
            equations = trace.num_equations(),
            "trace recorded"
        );
        Ok(trace)
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Tracer::new()
    }
}

impl Interpreter for Tracer {
    fn interpret(&mut self, insn: Instruction) -> Result<Value> {
        insn.check_arity()?;
        let op = insn.op();
        let rhs = insn.try_map(|v| {
            v.to_atom().ok_or_else(|| {
                Error::operation(op.name(), format!("cannot stage non-atom operand {v}"))
            })
        })?;
        let binder = self.fresh(RegKind::Var);
        let eqn = Equation::new(binder, rhs);
        tracing::trace!(index = self.equations.len(), equation = %eqn, "staged");
        self.equations.push(eqn);
        Ok(Value::Reg(binder))
    }
}
