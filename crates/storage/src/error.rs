//! Storage error model.

use thiserror::Error;

/// Persistence failure. Reported to the user as a warning; never rolls back
/// the in-memory state that was being saved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("storage unavailable: {cause}")]
pub struct StorageError {
    pub cause: String,
}

impl StorageError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }
}

impl From<anyhow::Error> for StorageError {
    fn from(value: anyhow::Error) -> Self {
        // `{:#}` keeps the context chain on one line.
        Self::new(format!("{value:#}"))
    }
}

/// Stored data could not be turned back into an inventory.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed inventory payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("stored inventory violates invariants: {0}")]
    Invalid(String),
}
