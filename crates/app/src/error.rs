use thiserror::Error;

use stockroom_core::{DomainError, ValidationError};

/// Failure of a session operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("invalid username or password")]
    InvalidCredentials,
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        AppError::Domain(value.into())
    }
}
