//! The contract between user computations and the interpreters that drive
//! them.
//!
//! A computation suspends by calling [`Interpreter::interpret`] with one
//! [`Instruction`] and continues with the value it gets back. Instructions
//! are produced in strict program order: the next one cannot be issued
//! before the previous call has returned. The computation completes by
//! returning its result.
//!
//! Interpreters compose by being computations themselves: a
//! [`Jvp`](crate::jvp::Jvp) handles each instruction of the computation it
//! drives by issuing new instructions to the interpreter driving *it*.
//! There is no ambient interpreter state; the driver is always passed
//! explicitly.
//!
//! ```
//! use jaxlet::{add, evaluate, mul, Interpreter, Result, Value};
//!
//! // x² + 1
//! fn square_plus_one(cx: &mut dyn Interpreter, x: &[Value]) -> Result<Value> {
//!     let sq = cx.interpret(mul(&x[0], &x[0]))?;
//!     cx.interpret(add(sq, 1.0))
//! }
//!
//! assert_eq!(evaluate(&square_plus_one, &[3.0]).unwrap(), 10.0);
//! ```

use crate::error::Result;
use crate::insn::Instruction;
use crate::value::Value;

/// A driver: consumes suspended instructions and supplies resume values.
pub trait Interpreter {
    /// Carry out one instruction on behalf of the computation being driven.
    fn interpret(&mut self, insn: Instruction) -> Result<Value>;
}

/// A user computation, runnable under any [`Interpreter`].
pub trait Computation {
    fn run(&self, cx: &mut dyn Interpreter, args: &[Value]) -> Result<Value>;
}

impl<F> Computation for F
where
    F: Fn(&mut dyn Interpreter, &[Value]) -> Result<Value>,
{
    #[inline]
    fn run(&self, cx: &mut dyn Interpreter, args: &[Value]) -> Result<Value> {
        self(cx, args)
    }
}

/// Pin a closure's signature to the [`Computation`] shape.
///
/// ```
/// use jaxlet::{evaluate, from_fn, mul};
///
/// let square = from_fn(|cx, x| cx.interpret(mul(&x[0], &x[0])));
/// assert_eq!(evaluate(&square, &[4.0]).unwrap(), 16.0);
/// ```
#[inline]
pub fn from_fn<F>(f: F) -> F
where
    F: Fn(&mut dyn Interpreter, &[Value]) -> Result<Value>,
{
    f
}
