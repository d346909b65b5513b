//! Error taxonomy shared by every interpreter and IR pass.
//!
//! All errors are fatal to the operation that raises them. A driver that
//! returns an error never resumes the computation it was driving; the error
//! unwinds through every enclosing driver via `?`.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// An operand or argument count does not match a fixed or expected arity.
    #[error("arity mismatch in {context}: expected {expected}, got {actual}")]
    Arity {
        /// What was being counted (an opcode name, "replay arguments", ...).
        context: String,
        expected: usize,
        actual: usize,
    },

    /// A driver was handed an instruction it cannot carry out: an unknown
    /// opcode, or operands of a kind this driver does not interpret.
    #[error("cannot perform `{op}`: {reason}")]
    Operation { op: String, reason: String },

    /// A completion value or IR structure failed a structural expectation.
    #[error("invariant violation: {0}")]
    Invariant(String),
}

impl Error {
    pub(crate) fn arity(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Error::Arity {
            context: context.into(),
            expected,
            actual,
        }
    }

    pub(crate) fn operation(op: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Operation {
            op: op.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Error::Invariant(message.into())
    }
}
