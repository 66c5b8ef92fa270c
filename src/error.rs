use thiserror::Error;

/// Error type for the reckoner crate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed input or a computation without a finite result
    #[error("InvalidExpression: {0}")]
    InvalidExpression(String),
    /// The right operand of a division was exactly zero
    #[error("DivisionByZero: division by zero")]
    DivisionByZero,
}

impl Error {
    pub(crate) fn invalid<S: Into<String>>(message: S) -> Self {
        Self::InvalidExpression(message.into())
    }
}
