//! Table-driven algebraic simplification.

use tracing::debug;

use crate::insn::Instruction;
use crate::opcode::OpCode;
use crate::value::Atom;

/// One operand position in a rule's source pattern.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pattern {
    /// Matches only this literal value.
    Lit(f64),
    /// Placeholder. The first occurrence of a slot captures the operand;
    /// later occurrences must equal the captured operand.
    Bind(u8),
    /// Matches anything, captures nothing.
    Any,
}

/// One operand position in a rule's replacement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Template {
    Lit(f64),
    /// The operand captured by [`Pattern::Bind`] with the same slot.
    Capture(u8),
}

/// `source(pattern..) => target(template..)`.
#[derive(Clone, Copy, Debug)]
pub struct RewriteRule {
    pub source: OpCode,
    pub pattern: &'static [Pattern],
    pub target: OpCode,
    pub template: &'static [Template],
}

use self::Pattern::{Any, Bind};

/// Identity and absorbing rules, in priority order.
pub const IDENTITY_RULES: &[RewriteRule] = &[
    // x + 0 = x
    RewriteRule {
        source: OpCode::Add,
        pattern: &[Bind(0), Pattern::Lit(0.0)],
        target: OpCode::Id,
        template: &[Template::Capture(0)],
    },
    // 0 + x = x
    RewriteRule {
        source: OpCode::Add,
        pattern: &[Pattern::Lit(0.0), Bind(0)],
        target: OpCode::Id,
        template: &[Template::Capture(0)],
    },
    // x * 1 = x
    RewriteRule {
        source: OpCode::Mul,
        pattern: &[Bind(0), Pattern::Lit(1.0)],
        target: OpCode::Id,
        template: &[Template::Capture(0)],
    },
    // 1 * x = x
    RewriteRule {
        source: OpCode::Mul,
        pattern: &[Pattern::Lit(1.0), Bind(0)],
        target: OpCode::Id,
        template: &[Template::Capture(0)],
    },
    // x * 0 = 0
    RewriteRule {
        source: OpCode::Mul,
        pattern: &[Any, Pattern::Lit(0.0)],
        target: OpCode::Id,
        template: &[Template::Lit(0.0)],
    },
    // 0 * x = 0
    RewriteRule {
        source: OpCode::Mul,
        pattern: &[Pattern::Lit(0.0), Any],
        target: OpCode::Id,
        template: &[Template::Lit(0.0)],
    },
    // iif(1, x, y) = x
    RewriteRule {
        source: OpCode::Iif,
        pattern: &[Pattern::Lit(1.0), Bind(0), Bind(1)],
        target: OpCode::Id,
        template: &[Template::Capture(0)],
    },
    // iif(0, x, y) = y
    RewriteRule {
        source: OpCode::Iif,
        pattern: &[Pattern::Lit(0.0), Bind(0), Bind(1)],
        target: OpCode::Id,
        template: &[Template::Capture(1)],
    },
];

impl RewriteRule {
    /// The rewritten instruction, or `None` if this rule does not match.
    pub fn apply(&self, insn: &Instruction<Atom>) -> Option<Instruction<Atom>> {
        if insn.op() != self.source || insn.args().len() != self.pattern.len() {
            return None;
        }

        let mut captures: Vec<(u8, Atom)> = Vec::with_capacity(self.pattern.len());
        for (&arg, pat) in insn.args().iter().zip(self.pattern) {
            match *pat {
                Any => {}
                Pattern::Lit(v) => {
                    if arg.as_lit() != Some(v) {
                        return None;
                    }
                }
                Bind(slot) => match captures.iter().find(|(s, _)| *s == slot) {
                    Some(&(_, bound)) if bound != arg => return None,
                    Some(_) => {}
                    None => captures.push((slot, arg)),
                },
            }
        }

        let args = self
            .template
            .iter()
            .map(|t| match *t {
                Template::Lit(v) => Some(Atom::Lit(v)),
                Template::Capture(slot) => captures
                    .iter()
                    .find(|(s, _)| *s == slot)
                    .map(|&(_, a)| a),
            })
            .collect::<Option<Vec<Atom>>>()?;
        Some(Instruction::new(self.target, args))
    }
}

impl super::Trace {
    /// Algebraic simplification with [`IDENTITY_RULES`].
    pub fn simplify(&self) -> super::Trace {
        self.simplify_with(IDENTITY_RULES)
    }

    /// Rewrite each equation with the first matching rule in `rules`.
    ///
    /// Binders and positions are preserved; a matched equation becomes
    /// whatever the rule produces (an `id` alias for the identity table).
    pub fn simplify_with(&self, rules: &[RewriteRule]) -> super::Trace {
        let mut rewritten = 0usize;
        let equations = self
            .equations
            .iter()
            .map(|eqn| match rules.iter().find_map(|rule| rule.apply(&eqn.rhs)) {
                Some(rhs) => {
                    rewritten += 1;
                    super::Equation::new(eqn.binder, rhs)
                }
                None => eqn.clone(),
            })
            .collect();
        debug!(rewritten, "simplify");
        super::Trace::from_parts(self.params.clone(), equations, self.ret)
    }
}
