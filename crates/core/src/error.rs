//! Domain error model.

use thiserror::Error;

use crate::id::RecordId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Input validation failure for record fields.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty after trimming surrounding whitespace.
    #[error("product name cannot be empty")]
    InvalidName,

    /// Quantity is not a non-negative integer.
    #[error("quantity must be a whole number of zero or more")]
    InvalidQuantity,

    /// Adjustment amount is not a positive integer.
    #[error("amount must be a whole number greater than zero")]
    InvalidAmount,
}

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// lookups, stock rules). Storage concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No record carries the requested id.
    #[error("no product with id {id}")]
    NotFound { id: RecordId },

    /// A decrease asked for more units than are on hand.
    #[error("insufficient stock for {name} (id {id}): only {available} available")]
    InsufficientStock {
        id: RecordId,
        name: String,
        available: u64,
    },

    /// Data violates an inventory invariant (e.g. duplicate ids on rebuild).
    #[error("invalid inventory state: {0}")]
    InvalidState(String),
}

impl DomainError {
    pub fn not_found(id: RecordId) -> Self {
        Self::NotFound { id }
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}
