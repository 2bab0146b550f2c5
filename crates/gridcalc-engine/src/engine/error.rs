//! Formula evaluation errors.
//!
//! None of these escape [`display_value`](super::display_value); they are
//! turned into the `#ERROR` sentinel there.

use thiserror::Error;

/// Errors that can occur while evaluating a formula.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The substituted text is not a valid arithmetic expression.
    #[error("Parse error at byte {position}: {message}")]
    Parse { position: usize, message: String },

    /// A token looks like a reference but names no representable cell
    /// (row 0, or an index that overflows).
    #[error("Malformed reference: {0}")]
    MalformedReference(String),

    #[error("Division by zero")]
    DivisionByZero,

    /// An intermediate or final value overflowed to infinity or became NaN.
    #[error("Result is not a finite number")]
    NonFinite,

    #[error("Expression nested deeper than {0} levels")]
    NestingTooDeep(usize),
}

impl EvalError {
    pub(crate) fn parse(position: usize, message: impl Into<String>) -> Self {
        EvalError::Parse {
            position,
            message: message.into(),
        }
    }
}
