//! Lowering errors

use reify_types::TypeError;
use thiserror::Error;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("Internal compiler error: {message}")]
    InternalError { message: String },

    #[error(transparent)]
    Type(#[from] TypeError),
}

impl CompileError {
    pub fn internal(message: impl Into<String>) -> Self {
        CompileError::InternalError {
            message: message.into(),
        }
    }

    /// Whether this error signals malformed compiler input rather than a dangling id
    pub fn is_internal(&self) -> bool {
        matches!(self, CompileError::InternalError { .. })
    }
}
