//! Values that flow between computations and interpreters.
//!
//! A computation only ever sees [`Value`]s: concrete numbers under the
//! direct evaluator, [`VReg`]s under the tracer, and [`Dual`]s under a JVP.
//! The trace IR uses the narrower [`Atom`] (a literal or a register).

use std::fmt::{self, Display};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::dual::Dual;

static NEXT_NAMESPACE: AtomicU32 = AtomicU32::new(0);

/// Allocate a register namespace. Each tracer owns one.
pub(crate) fn fresh_namespace() -> u32 {
    NEXT_NAMESPACE.fetch_add(1, Ordering::Relaxed)
}

/// Whether a register names a trace parameter or an equation result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegKind {
    Param,
    Var,
}

/// A symbolic register minted by a [`Tracer`](crate::trace::Tracer).
///
/// Registers compare by identity: two registers from different tracers are
/// never equal, even when they render the same.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VReg {
    namespace: u32,
    index: u32,
    kind: RegKind,
}

impl VReg {
    #[inline]
    pub(crate) fn new(namespace: u32, index: u32, kind: RegKind) -> Self {
        VReg {
            namespace,
            index,
            kind,
        }
    }

    /// Position in the minting tracer's counter.
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub fn kind(self) -> RegKind {
        self.kind
    }

    /// Short name: `x<n>` for parameters, `v<n>` for equation results.
    pub fn name(self) -> String {
        match self.kind {
            RegKind::Param => format!("x{}", self.index),
            RegKind::Var => format!("v{}", self.index),
        }
    }
}

impl Display for VReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VReg({})", self.name())
    }
}

/// An IR operand: a literal number or a register.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Atom {
    Lit(f64),
    Reg(VReg),
}

impl Atom {
    #[inline]
    pub fn as_reg(&self) -> Option<VReg> {
        match *self {
            Atom::Reg(r) => Some(r),
            Atom::Lit(_) => None,
        }
    }

    #[inline]
    pub fn as_lit(&self) -> Option<f64> {
        match *self {
            Atom::Lit(v) => Some(v),
            Atom::Reg(_) => None,
        }
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Lit(v) => write!(f, "Atom({v})"),
            Atom::Reg(r) => write!(f, "Atom({r})"),
        }
    }
}

impl From<f64> for Atom {
    fn from(v: f64) -> Self {
        Atom::Lit(v)
    }
}

impl From<VReg> for Atom {
    fn from(r: VReg) -> Self {
        Atom::Reg(r)
    }
}

/// Anything a computation can hold or an interpreter can resume with.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Num(f64),
    Reg(VReg),
    Dual(Box<Dual>),
}

impl Value {
    #[inline]
    pub fn as_num(&self) -> Option<f64> {
        match *self {
            Value::Num(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_reg(&self) -> Option<VReg> {
        match *self {
            Value::Reg(r) => Some(r),
            _ => None,
        }
    }

    #[inline]
    pub fn as_dual(&self) -> Option<&Dual> {
        match self {
            Value::Dual(d) => Some(&**d),
            _ => None,
        }
    }

    /// The IR operand for this value, if it has one. Duals do not.
    #[inline]
    pub fn to_atom(&self) -> Option<Atom> {
        match *self {
            Value::Num(v) => Some(Atom::Lit(v)),
            Value::Reg(r) => Some(Atom::Reg(r)),
            Value::Dual(_) => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Num(v) => write!(f, "{v}"),
            Value::Reg(r) => write!(f, "{r}"),
            Value::Dual(d) => write!(f, "{d}"),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Num(v)
    }
}

impl From<VReg> for Value {
    fn from(r: VReg) -> Self {
        Value::Reg(r)
    }
}

impl From<Atom> for Value {
    fn from(a: Atom) -> Self {
        match a {
            Atom::Lit(v) => Value::Num(v),
            Atom::Reg(r) => Value::Reg(r),
        }
    }
}

impl From<Dual> for Value {
    fn from(d: Dual) -> Self {
        Value::Dual(Box::new(d))
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}
