//! Forward-mode differentiation as an interpreter transformer.
//!
//! [`JvpInterpreter`] never computes anything itself. Each instruction is
//! re-expressed as the instructions of its differentiation rule and issued
//! to the next interpreter out, so the same rules run under the direct
//! evaluator, under the tracer, or under another JVP (higher derivatives).

use crate::dual::{Dual, DualTag};
use crate::error::{Error, Result};
use crate::insn::{add, iif, mul, Instruction};
use crate::interpreter::{Computation, Interpreter};
use crate::opcode::OpCode;
use crate::value::Value;

/// Handler for one differentiation instance.
///
/// Operands are lifted to duals of this instance (foreign values get a zero
/// tangent), and the primal and tangent parts of each result are obtained
/// from `next`.
pub struct JvpInterpreter<'a> {
    tag: DualTag,
    next: &'a mut dyn Interpreter,
}

impl<'a> JvpInterpreter<'a> {
    /// Start a new instance with a freshly minted tag.
    pub fn new(next: &'a mut dyn Interpreter) -> Self {
        JvpInterpreter {
            tag: DualTag::fresh(),
            next,
        }
    }

    #[inline]
    pub fn tag(&self) -> DualTag {
        self.tag
    }

    #[inline]
    pub fn lift(&self, value: &Value, tangent: Value) -> Dual {
        Dual::lift(self.tag, value, tangent)
    }

    /// Extract the tangent of a completion value.
    ///
    /// The value must be a dual owned by this instance.
    pub fn tangent_of(&self, out: Value) -> Result<Value> {
        match out {
            Value::Dual(d) if d.tag == self.tag => Ok(d.tangent),
            Value::Dual(d) => Err(Error::invariant(format!(
                "jvp {} completed with a dual owned by instance {}",
                self.tag, d.tag
            ))),
            other => Err(Error::invariant(format!(
                "jvp {} completed with non-dual value {other}",
                self.tag
            ))),
        }
    }

    #[inline]
    fn emit(&mut self, insn: Instruction) -> Result<Value> {
        self.next.interpret(insn)
    }
}

impl Interpreter for JvpInterpreter<'_> {
    fn interpret(&mut self, insn: Instruction) -> Result<Value> {
        insn.check_arity()?;
        let op = insn.op();
        let args: Vec<Dual> = insn
            .args()
            .iter()
            .map(|a| self.lift(a, Value::Num(0.0)))
            .collect();

        let out = match (op, args.as_slice()) {
            (OpCode::Add, [x, y]) => {
                let primal = self.emit(add(&x.primal, &y.primal))?;
                let tangent = self.emit(add(&x.tangent, &y.tangent))?;
                Dual::new(self.tag, primal, tangent)
            }
            (OpCode::Mul, [x, y]) => {
                // d(xy) = x·dy + y·dx
                let primal = self.emit(mul(&x.primal, &y.primal))?;
                let x_dy = self.emit(mul(&x.primal, &y.tangent))?;
                let y_dx = self.emit(mul(&y.primal, &x.tangent))?;
                let tangent = self.emit(add(x_dy, y_dx))?;
                Dual::new(self.tag, primal, tangent)
            }
            (OpCode::Iif, [c, t, f]) => {
                // TODO: standard AD selects the tangent of the branch the
                // primal condition picks; this selects on the condition's
                // tangent instead. Kept until the intended rule is settled.
                let primal = self.emit(iif(&c.primal, &t.primal, &f.primal))?;
                let tangent = self.emit(iif(&c.tangent, &t.tangent, &f.tangent))?;
                Dual::new(self.tag, primal, tangent)
            }
            (OpCode::Id, [v]) => v.clone(),
            _ => return Err(Error::arity(op.name(), op.arity(), args.len())),
        };
        Ok(Value::from(out))
    }
}

/// Jacobian-vector product of `f` along fixed seed tangents, as a
/// computation.
///
/// Running a `Jvp` with primals `x` produces the tangent of `f` at `x` in
/// the seed direction. Because a `Jvp` is itself a [`Computation`], it can
/// be evaluated, traced, or wrapped in another `Jvp`.
pub struct Jvp<'f, C: ?Sized> {
    f: &'f C,
    tangents: Vec<Value>,
}

/// Wrap `f` for differentiation along `tangents`.
///
/// ```
/// use jaxlet::{add, evaluate, jvp, mul, Interpreter, Result, Value};
///
/// // x² + x
/// fn f(cx: &mut dyn Interpreter, x: &[Value]) -> Result<Value> {
///     let sq = cx.interpret(mul(&x[0], &x[0]))?;
///     cx.interpret(add(sq, &x[0]))
/// }
///
/// // f'(3) = 2·3 + 1
/// assert_eq!(evaluate(&jvp(&f, [1.0]), &[3.0]).unwrap(), 7.0);
/// // f''(3) = 2
/// assert_eq!(evaluate(&jvp(&jvp(&f, [1.0]), [1.0]), &[3.0]).unwrap(), 2.0);
/// ```
pub fn jvp<C, I>(f: &C, tangents: I) -> Jvp<'_, C>
where
    C: Computation + ?Sized,
    I: IntoIterator,
    I::Item: Into<Value>,
{
    Jvp {
        f,
        tangents: tangents.into_iter().map(Into::into).collect(),
    }
}

impl<C: Computation + ?Sized> Jvp<'_, C> {
    #[inline]
    pub fn tangents(&self) -> &[Value] {
        &self.tangents
    }
}

impl<C: Computation + ?Sized> Computation for Jvp<'_, C> {
    fn run(&self, cx: &mut dyn Interpreter, primals: &[Value]) -> Result<Value> {
        if primals.len() != self.tangents.len() {
            return Err(Error::arity(
                "jvp primals",
                self.tangents.len(),
                primals.len(),
            ));
        }
        let mut jvp = JvpInterpreter::new(cx);
        let inputs: Vec<Value> = primals
            .iter()
            .zip(&self.tangents)
            .map(|(p, t)| Value::from(jvp.lift(p, t.clone())))
            .collect();
        let out = self.f.run(&mut jvp, &inputs)?;
        jvp.tangent_of(out)
    }
}
