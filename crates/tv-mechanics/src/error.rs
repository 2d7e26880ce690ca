//! Error types for the mechanics engine.

/// Errors that can occur during mechanics operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MechError {
    /// A dice expression could not be parsed.
    #[error("invalid dice expression: {0}")]
    InvalidDice(String),

    /// A die was requested with fewer than one side.
    #[error("invalid die size: {0}")]
    InvalidDieSize(u32),

    /// An arithmetic expression could not be parsed.
    #[error("invalid expression `{expr}`: {message}")]
    InvalidExpression {
        /// The source text of the expression.
        expr: String,
        /// What went wrong.
        message: String,
    },

    /// An expression referenced a name with no value.
    #[error("unknown reference in expression: {0}")]
    UnknownReference(String),

    /// An expression divided by zero.
    #[error("division by zero")]
    DivisionByZero,
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
