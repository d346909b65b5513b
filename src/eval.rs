use crate::error::{Error, Result};
use crate::insn::Instruction;
use crate::interpreter::Interpreter;
use crate::opcode;
use crate::value::Value;

/// Direct evaluator: executes every instruction immediately on numbers.
#[derive(Clone, Copy, Debug, Default)]
pub struct Evaluator;

impl Interpreter for Evaluator {
    fn interpret(&mut self, insn: Instruction) -> Result<Value> {
        insn.check_arity()?;
        let op = insn.op();
        let args = insn
            .args()
            .iter()
            .map(|a| {
                a.as_num().ok_or_else(|| {
                    Error::operation(op.name(), format!("operand {a} is not a number"))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        opcode::eval_numeric(op, &args).map(Value::Num)
    }
}
