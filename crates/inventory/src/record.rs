use serde::Serialize;

use stockroom_core::{DomainResult, Entity, RecordId, ValidationError};

/// A stock-keeping unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    id: RecordId,
    name: String,
    quantity: u64,
}

impl Record {
    /// Build a record from already-assigned parts (e.g. when rehydrating from storage).
    ///
    /// The name is trimmed; a blank name is rejected.
    pub fn new(id: RecordId, name: &str, quantity: u64) -> DomainResult<Self> {
        let name = validate_name(name)?;
        Ok(Self { id, name, quantity })
    }

    /// Assemble a record from parts that were validated upstream.
    pub(crate) fn from_parts(id: RecordId, name: String, quantity: u64) -> Self {
        Self { id, name, quantity }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Case-insensitive substring match on the name. A blank query matches.
    pub fn name_matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty() || self.name.to_lowercase().contains(&needle)
    }

    pub(crate) fn rename(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_quantity(&mut self, quantity: u64) {
        self.quantity = quantity;
    }
}

impl Entity for Record {
    type Id = RecordId;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Trim and validate a product name.
pub(crate) fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidName);
    }
    Ok(trimmed.to_string())
}

pub(crate) fn validate_quantity(quantity: i64) -> Result<u64, ValidationError> {
    u64::try_from(quantity).map_err(|_| ValidationError::InvalidQuantity)
}

pub(crate) fn validate_amount(amount: i64) -> Result<u64, ValidationError> {
    match u64::try_from(amount) {
        Ok(amount) if amount > 0 => Ok(amount),
        _ => Err(ValidationError::InvalidAmount),
    }
}

/// Parse a quantity typed by the user (trimmed base-10 integer, zero or more).
pub fn parse_quantity(input: &str) -> Result<i64, ValidationError> {
    let quantity = input
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidQuantity)?;
    validate_quantity(quantity)?;
    Ok(quantity)
}

/// Parse an adjustment amount typed by the user.
///
/// Unparseable input yields `None`; sign is preserved so that the batch
/// operation can decide whether to skip the entry.
pub fn parse_amount(input: &str) -> Option<i64> {
    input.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::DomainError;

    fn id(raw: u64) -> RecordId {
        RecordId::new(raw).unwrap()
    }

    #[test]
    fn new_trims_name() {
        let record = Record::new(id(1), "  Gasket \t", 3).unwrap();
        assert_eq!(record.name(), "Gasket");
        assert_eq!(record.quantity(), 3);
        assert_eq!(record.id(), id(1));
    }

    #[test]
    fn name_matching_ignores_case_and_blank_queries() {
        let record = Record::new(id(1), "Bulk Fastener (M8)", 4).unwrap();
        assert!(record.name_matches("fastener"));
        assert!(record.name_matches(" M8 "));
        assert!(record.name_matches(""));
        assert!(!record.name_matches("bolt"));
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Record::new(id(1), "   ", 3).unwrap_err();
        assert_eq!(err, DomainError::from(ValidationError::InvalidName));
    }

    #[test]
    fn quantity_must_be_non_negative() {
        assert_eq!(validate_quantity(0), Ok(0));
        assert_eq!(validate_quantity(12), Ok(12));
        assert_eq!(validate_quantity(-1), Err(ValidationError::InvalidQuantity));
    }

    #[test]
    fn amount_must_be_positive() {
        assert_eq!(validate_amount(5), Ok(5));
        assert_eq!(validate_amount(0), Err(ValidationError::InvalidAmount));
        assert_eq!(validate_amount(-3), Err(ValidationError::InvalidAmount));
    }

    #[test]
    fn parse_quantity_accepts_whole_numbers_only() {
        assert_eq!(parse_quantity(" 20 "), Ok(20));
        assert_eq!(parse_quantity("0"), Ok(0));
        assert_eq!(parse_quantity("-4"), Err(ValidationError::InvalidQuantity));
        assert_eq!(parse_quantity("4.5"), Err(ValidationError::InvalidQuantity));
        assert_eq!(parse_quantity(""), Err(ValidationError::InvalidQuantity));
        assert_eq!(parse_quantity("ten"), Err(ValidationError::InvalidQuantity));
    }

    #[test]
    fn parse_amount_keeps_sign_and_rejects_garbage() {
        assert_eq!(parse_amount("7"), Some(7));
        assert_eq!(parse_amount("-2"), Some(-2));
        assert_eq!(parse_amount("abc"), None);
    }
}
