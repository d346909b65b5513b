use std::fmt::{self, Display};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::value::Value;

static NEXT_TAG: AtomicU64 = AtomicU64::new(0);

/// Identity of one differentiation instance.
///
/// Every [`Jvp`](crate::jvp::Jvp) drive mints a fresh tag, so duals produced
/// by nested instances are never mistaken for one another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DualTag(u64);

impl DualTag {
    /// Mint a tag no other instance in this process holds.
    #[inline]
    pub fn fresh() -> Self {
        DualTag(NEXT_TAG.fetch_add(1, Ordering::Relaxed))
    }
}

impl Display for DualTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Forward-mode dual number: a primal paired with its tangent, owned by
/// exactly one differentiation instance.
///
/// Primal and tangent are arbitrary [`Value`]s: under nesting they are
/// themselves duals of an outer instance, and under staging they are
/// registers.
#[derive(Clone, Debug, PartialEq)]
pub struct Dual {
    pub tag: DualTag,
    /// Primal (real) value.
    pub primal: Value,
    /// Tangent (derivative) value.
    pub tangent: Value,
}

impl Dual {
    #[inline]
    pub fn new(tag: DualTag, primal: Value, tangent: Value) -> Self {
        Dual {
            tag,
            primal,
            tangent,
        }
    }

    /// Create a constant (zero tangent).
    #[inline]
    pub fn constant(tag: DualTag, primal: Value) -> Self {
        Dual::new(tag, primal, Value::Num(0.0))
    }

    /// View `value` as a dual of instance `tag`.
    ///
    /// A dual already owned by `tag` is returned unchanged. Anything else,
    /// including a dual owned by another instance, becomes the primal of a
    /// new dual with the given `tangent`.
    pub fn lift(tag: DualTag, value: &Value, tangent: Value) -> Self {
        match value {
            Value::Dual(d) if d.tag == tag => (**d).clone(),
            other => Dual::new(tag, other.clone(), tangent),
        }
    }
}

impl Display for Dual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dual{}({} + {}ε)", self.tag, self.primal, self.tangent)
    }
}
