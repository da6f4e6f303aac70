//! Sentences shown to the user for outcomes and failures.

use stockroom_core::{DomainError, ValidationError};
use stockroom_inventory::{AdjustmentError, AdjustmentReport};
use stockroom_storage::StorageError;

use crate::error::AppError;

/// Human-readable message for the presentation layer.
pub trait UserMessage {
    fn user_message(&self) -> String;
}

impl UserMessage for ValidationError {
    fn user_message(&self) -> String {
        match self {
            ValidationError::InvalidName => "Please enter a product name.".to_string(),
            ValidationError::InvalidQuantity => {
                "Please enter a valid quantity (a whole number, 0 or more).".to_string()
            }
            ValidationError::InvalidAmount => {
                "Please enter an amount greater than zero.".to_string()
            }
        }
    }
}

impl UserMessage for DomainError {
    fn user_message(&self) -> String {
        match self {
            DomainError::Validation(v) => v.user_message(),
            DomainError::NotFound { id } => {
                format!("Product #{id} no longer exists.")
            }
            DomainError::InsufficientStock {
                name, available, ..
            } => format!("Cannot remove that many units of {name}: only {available} in stock."),
            DomainError::InvalidState(msg) => format!("Something went wrong: {msg}."),
        }
    }
}

impl UserMessage for AdjustmentError {
    fn user_message(&self) -> String {
        match self {
            AdjustmentError::InsufficientStock {
                name, available, ..
            } => format!("{name}: only {available} in stock"),
            AdjustmentError::QuantityOverflow { name, .. } => {
                format!("{name}: quantity would be too large")
            }
        }
    }
}

impl UserMessage for AdjustmentReport {
    fn user_message(&self) -> String {
        let updated = match self.succeeded {
            0 => None,
            1 => Some("Updated 1 product.".to_string()),
            n => Some(format!("Updated {n} products.")),
        };

        if self.is_clean() {
            return updated.unwrap_or_else(|| "No changes were made.".to_string());
        }

        let failures: Vec<String> = self.errors.iter().map(UserMessage::user_message).collect();
        let failed = match self.errors.len() {
            1 => format!("1 adjustment failed ({}).", failures[0]),
            n => format!("{n} adjustments failed ({}).", failures.join("; ")),
        };

        match updated {
            Some(updated) => format!("{updated} {failed}"),
            None => failed,
        }
    }
}

impl UserMessage for StorageError {
    fn user_message(&self) -> String {
        format!(
            "Your change was applied but could not be saved ({}). It will be lost when you leave.",
            self.cause
        )
    }
}

impl UserMessage for AppError {
    fn user_message(&self) -> String {
        match self {
            AppError::Domain(err) => err.user_message(),
            AppError::InvalidCredentials => "Invalid username or password.".to_string(),
        }
    }
}
