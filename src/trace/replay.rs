use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::interpreter::{Computation, Interpreter};
use crate::value::{Atom, VReg, Value};

use super::Trace;

/// A trace bound to concrete arguments, runnable as a computation.
///
/// Driving a `Replay` re-issues the trace's equations in order, with
/// operands substituted through an environment of resumed values. Under
/// the [`Evaluator`](crate::Evaluator) this re-executes the trace; under a
/// [`Tracer`](super::Tracer) it re-stages it.
#[derive(Clone, Debug)]
pub struct Replay<'t> {
    trace: &'t Trace,
    args: Vec<Value>,
}

impl Trace {
    /// Bind `args` to this trace's parameters.
    ///
    /// Fails with [`Error::Arity`] unless exactly one argument per parameter
    /// is given.
    pub fn replay<I>(&self, args: I) -> Result<Replay<'_>>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let args: Vec<Value> = args.into_iter().map(Into::into).collect();
        if args.len() != self.params.len() {
            return Err(Error::arity(
                "replay arguments",
                self.params.len(),
                args.len(),
            ));
        }
        Ok(Replay { trace: self, args })
    }

    fn run_with(&self, cx: &mut dyn Interpreter, args: &[Value]) -> Result<Value> {
        if args.len() != self.params.len() {
            return Err(Error::arity(
                "replay arguments",
                self.params.len(),
                args.len(),
            ));
        }
        let mut env: HashMap<VReg, Value> = self
            .params
            .iter()
            .copied()
            .zip(args.iter().cloned())
            .collect();

        for eqn in &self.equations {
            let insn = eqn.rhs.clone().try_map(|a| resolve(&env, a))?;
            let result = cx.interpret(insn)?;
            env.insert(eqn.binder, result);
        }
        resolve(&env, self.ret)
    }
}

fn resolve(env: &HashMap<VReg, Value>, atom: Atom) -> Result<Value> {
    match atom {
        Atom::Lit(v) => Ok(Value::Num(v)),
        Atom::Reg(r) => env
            .get(&r)
            .cloned()
            .ok_or_else(|| Error::invariant(format!("replay reads unbound register {r}"))),
    }
}

impl Replay<'_> {
    #[inline]
    pub fn trace(&self) -> &Trace {
        self.trace
    }

    #[inline]
    pub fn args(&self) -> &[Value] {
        &self.args
    }
}

/// The arguments are already bound, so a `Replay` is driven with none.
impl Computation for Replay<'_> {
    fn run(&self, cx: &mut dyn Interpreter, args: &[Value]) -> Result<Value> {
        if !args.is_empty() {
            return Err(Error::arity("replay driver arguments", 0, args.len()));
        }
        self.trace.run_with(cx, &self.args)
    }
}

/// A trace run directly takes its arguments from the driver.
impl Computation for Trace {
    fn run(&self, cx: &mut dyn Interpreter, args: &[Value]) -> Result<Value> {
        self.run_with(cx, args)
    }
}
