pub mod api;
pub mod dual;
pub mod error;
pub mod eval;
pub mod insn;
pub mod interpreter;
pub mod jvp;
pub mod opcode;
pub mod trace;
pub mod value;

pub use api::{
    derivative_at, differentiate, eliminate_aliases, eliminate_dead_code, evaluate,
    fold_constants, optimize, optimize_with, replay, simplify, trace,
};
pub use dual::{Dual, DualTag};
pub use error::{Error, Result};
pub use eval::Evaluator;
pub use insn::{add, id, iif, mul, Instruction};
pub use interpreter::{from_fn, Computation, Interpreter};
pub use jvp::{jvp, Jvp, JvpInterpreter};
pub use opcode::OpCode;
pub use trace::{Equation, OptimizeParams, Replay, RewriteRule, Trace, Tracer};
pub use value::{Atom, RegKind, VReg, Value};
