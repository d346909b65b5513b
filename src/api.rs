use crate::error::{Error, Result};
use crate::eval::Evaluator;
use crate::interpreter::Computation;
use crate::jvp::jvp;
use crate::trace::{OptimizeParams, Replay, Trace, Tracer};
use crate::value::Value;

/// Evaluate `f` at `args` with the direct evaluator.
///
/// ```
/// use jaxlet::{add, evaluate, mul, Interpreter, Result, Value};
///
/// fn f(cx: &mut dyn Interpreter, x: &[Value]) -> Result<Value> {
///     let xsq = cx.interpret(mul(&x[0], &x[0]))?;
///     let x2 = cx.interpret(mul(&x[0], 2.0))?;
///     let t = cx.interpret(add(xsq, x2))?;
///     cx.interpret(add(t, 1.0))
/// }
///
/// assert_eq!(evaluate(&f, &[2.0]).unwrap(), 9.0);
/// ```
pub fn evaluate<C: Computation + ?Sized>(f: &C, args: &[f64]) -> Result<f64> {
    let args: Vec<Value> = args.iter().copied().map(Value::Num).collect();
    let out = f.run(&mut Evaluator, &args)?;
    out.as_num().ok_or_else(|| {
        Error::invariant(format!("evaluation completed with non-numeric value {out}"))
    })
}

/// Jacobian-vector product (forward mode): the tangent of `f` at `primals`
/// along `tangents`.
pub fn differentiate<C: Computation + ?Sized>(
    f: &C,
    primals: &[f64],
    tangents: &[f64],
) -> Result<f64> {
    if primals.len() != tangents.len() {
        return Err(Error::arity("tangents", primals.len(), tangents.len()));
    }
    evaluate(&jvp(f, tangents.iter().copied()), primals)
}

/// Derivative of a unary `f` at `x`.
pub fn derivative_at<C: Computation + ?Sized>(f: &C, x: f64) -> Result<f64> {
    differentiate(f, &[x], &[1.0])
}

/// Stage `f` into a trace with `arity` symbolic parameters.
pub fn trace<C: Computation + ?Sized>(f: &C, arity: usize) -> Result<Trace> {
    Tracer::new().trace(f, arity)
}

/// Bind `args` to `trace`, producing a computation that replays it.
pub fn replay<I>(trace: &Trace, args: I) -> Result<Replay<'_>>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    trace.replay(args)
}

pub fn eliminate_dead_code(trace: &Trace) -> Trace {
    trace.dead_code_elimination()
}

pub fn simplify(trace: &Trace) -> Trace {
    trace.simplify()
}

pub fn eliminate_aliases(trace: &Trace) -> Result<Trace> {
    trace.eliminate_aliases()
}

pub fn fold_constants(trace: &Trace) -> Result<Trace> {
    trace.fold_constants()
}

/// Run `rounds` rounds of simplify + alias elimination.
pub fn optimize(trace: &Trace, rounds: usize) -> Result<Trace> {
    trace.optimize(rounds)
}

pub fn optimize_with(trace: &Trace, params: &OptimizeParams) -> Result<Trace> {
    trace.optimize_with(params)
}
