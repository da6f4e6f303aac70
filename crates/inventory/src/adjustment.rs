//! Batch stock adjustment types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockroom_core::{DomainError, RecordId};

use crate::record::parse_amount;

/// Direction of a stock adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increase,
    Decrease,
}

/// One entry of a batch adjustment, as collected from the user.
///
/// Raw values are kept as-is: a zero `id` or a non-positive `amount` makes the
/// entry a silent no-op rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentRequest {
    pub id: u64,
    pub amount: i64,
    pub direction: Direction,
}

impl AdjustmentRequest {
    pub fn new(id: u64, amount: i64, direction: Direction) -> Self {
        Self {
            id,
            amount,
            direction,
        }
    }

    pub fn increase(id: u64, amount: i64) -> Self {
        Self::new(id, amount, Direction::Increase)
    }

    pub fn decrease(id: u64, amount: i64) -> Self {
        Self::new(id, amount, Direction::Decrease)
    }

    /// Build a request from raw form fields. Unparseable fields become zero,
    /// which the batch treats as "nothing to do".
    pub fn from_input(id: &str, amount: &str, direction: Direction) -> Self {
        let id = id.trim().parse::<u64>().unwrap_or(0);
        let amount = parse_amount(amount).unwrap_or(0);
        Self::new(id, amount, direction)
    }

    /// The target id and amount, if this entry should be processed at all.
    pub(crate) fn actionable(&self) -> Option<(RecordId, u64)> {
        let id = RecordId::new(self.id)?;
        let amount = u64::try_from(self.amount).ok().filter(|a| *a > 0)?;
        Some((id, amount))
    }
}

/// Per-entry failure inside a batch adjustment.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdjustmentError {
    #[error("insufficient stock for {name} (id {id}): only {available} available")]
    InsufficientStock {
        id: RecordId,
        name: String,
        available: u64,
    },

    #[error("quantity of {name} (id {id}) would exceed the supported maximum")]
    QuantityOverflow { id: RecordId, name: String },
}

impl AdjustmentError {
    pub fn id(&self) -> RecordId {
        match self {
            AdjustmentError::InsufficientStock { id, .. } => *id,
            AdjustmentError::QuantityOverflow { id, .. } => *id,
        }
    }
}

impl From<AdjustmentError> for DomainError {
    fn from(value: AdjustmentError) -> Self {
        match value {
            AdjustmentError::InsufficientStock {
                id,
                name,
                available,
            } => DomainError::InsufficientStock {
                id,
                name,
                available,
            },
            AdjustmentError::QuantityOverflow { id, name } => DomainError::invalid_state(format!(
                "quantity of {name} (id {id}) would overflow"
            )),
        }
    }
}

/// Outcome of a batch adjustment: partial success is expected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentReport {
    /// Entries that changed a record's quantity.
    pub succeeded: usize,
    /// Entries that targeted an existing record but could not be applied.
    pub errors: Vec<AdjustmentError>,
}

impl AdjustmentReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_changes(&self) -> bool {
        self.succeeded > 0
    }
}
