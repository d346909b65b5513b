use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{Error, Result};
use crate::insn::Instruction;
use crate::opcode::{self, OpCode};
use crate::value::{Atom, VReg};

use super::{Equation, Trace};

/// Parameters for the bounded fixed-point optimizer.
#[derive(Debug, Clone)]
pub struct OptimizeParams {
    /// Number of simplify + alias-elimination rounds (default: 1).
    pub rounds: usize,
    /// Fold all-literal equations at the start of each round (default: false).
    pub fold_constants: bool,
    /// Run dead-code elimination once after the last round (default: false).
    pub dead_code: bool,
}

impl Default for OptimizeParams {
    fn default() -> Self {
        OptimizeParams {
            rounds: 1,
            fold_constants: false,
            dead_code: false,
        }
    }
}

impl Trace {
    /// Drop equations whose result cannot reach the return atom.
    ///
    /// One backward sweep suffices because equations are topologically
    /// sorted. Parameters are never removed.
    pub fn dead_code_elimination(&self) -> Trace {
        let mut live: HashSet<VReg> = HashSet::new();
        if let Atom::Reg(r) = self.ret {
            live.insert(r);
        }

        let mut kept: Vec<Equation> = Vec::with_capacity(self.equations.len());
        for eqn in self.equations.iter().rev() {
            if live.contains(&eqn.binder) {
                live.extend(eqn.operand_regs());
                kept.push(eqn.clone());
            }
        }
        kept.reverse();

        debug!(
            before = self.equations.len(),
            after = kept.len(),
            "dead code elimination"
        );
        Trace::from_parts(self.params.clone(), kept, self.ret)
    }

    /// Remove `id` equations, substituting each alias into its readers.
    ///
    /// Substitution goes one hop: a reader of `b` where `b = id(a)` reads
    /// `a` afterwards even if `a` is itself an alias. An alias that is still
    /// read after substitution (the middle of a chain) is kept for the next
    /// pass, so the result stays well-formed; every other `id` is dropped.
    ///
    /// Fails with [`Error::Invariant`] if the return register aliases a
    /// literal.
    pub fn eliminate_aliases(&self) -> Result<Trace> {
        let mut aliases: HashMap<VReg, Atom> = HashMap::new();
        let mut staged: Vec<Equation> = Vec::with_capacity(self.equations.len());
        let mut read: HashSet<VReg> = HashSet::new();

        for eqn in &self.equations {
            if eqn.rhs.op() == OpCode::Id {
                let [target] = eqn.rhs.args() else {
                    return Err(Error::arity("id", 1, eqn.rhs.args().len()));
                };
                aliases.insert(eqn.binder, *target);
                staged.push(eqn.clone());
            } else {
                let args: Vec<Atom> = eqn
                    .rhs
                    .args()
                    .iter()
                    .map(|&a| match a {
                        Atom::Reg(r) => aliases.get(&r).copied().unwrap_or(a),
                        Atom::Lit(_) => a,
                    })
                    .collect();
                read.extend(args.iter().filter_map(Atom::as_reg));
                staged.push(Equation::new(
                    eqn.binder,
                    Instruction::new(eqn.rhs.op(), args),
                ));
            }
        }

        let ret = match self.ret {
            Atom::Reg(r) => match aliases.get(&r) {
                Some(&Atom::Reg(target)) => Atom::Reg(target),
                Some(&Atom::Lit(v)) => {
                    return Err(Error::invariant(format!(
                        "return register {r} aliases literal {v}"
                    )))
                }
                None => self.ret,
            },
            lit => lit,
        };
        if let Atom::Reg(r) = ret {
            read.insert(r);
        }

        // Backward sweep: keep an alias only while something still reads it.
        let mut kept: Vec<Equation> = Vec::with_capacity(staged.len());
        for eqn in staged.into_iter().rev() {
            if eqn.rhs.op() == OpCode::Id {
                if !read.contains(&eqn.binder) {
                    continue;
                }
                read.extend(eqn.operand_regs());
            }
            kept.push(eqn);
        }
        kept.reverse();

        debug!(
            before = self.equations.len(),
            after = kept.len(),
            aliases = aliases.len(),
            "alias elimination"
        );
        Ok(Trace::from_parts(self.params.clone(), kept, ret))
    }

    /// Replace each non-`id` equation whose operands are all literals with
    /// `id(<value>)`. Alias elimination then removes it.
    pub fn fold_constants(&self) -> Result<Trace> {
        let mut folded = 0usize;
        let mut equations = Vec::with_capacity(self.equations.len());
        for eqn in &self.equations {
            let op = eqn.rhs.op();
            let lits: Option<Vec<f64>> = eqn.rhs.args().iter().map(Atom::as_lit).collect();
            match lits {
                Some(lits) if op != OpCode::Id => {
                    let value = opcode::eval_numeric(op, &lits)?;
                    folded += 1;
                    equations.push(Equation::new(
                        eqn.binder,
                        Instruction::new(OpCode::Id, vec![Atom::Lit(value)]),
                    ));
                }
                _ => equations.push(eqn.clone()),
            }
        }
        debug!(folded, "constant folding");
        Ok(Trace::from_parts(self.params.clone(), equations, self.ret))
    }

    /// `rounds` rounds of simplify followed by alias elimination.
    ///
    /// Each round may expose work for the next; there is no convergence
    /// check.
    pub fn optimize(&self, rounds: usize) -> Result<Trace> {
        self.optimize_with(&OptimizeParams {
            rounds,
            ..OptimizeParams::default()
        })
    }

    pub fn optimize_with(&self, params: &OptimizeParams) -> Result<Trace> {
        let mut current = self.clone();
        for round in 0..params.rounds {
            if params.fold_constants {
                current = current.fold_constants()?;
            }
            current = current.simplify().eliminate_aliases()?;
            debug!(round, equations = current.num_equations(), "optimizer round");
            debug_assert!(
                current.validate().is_ok(),
                "optimizer round {round} produced an ill-formed trace"
            );
        }
        if params.dead_code {
            current = current.dead_code_elimination();
        }
        Ok(current)
    }
}
