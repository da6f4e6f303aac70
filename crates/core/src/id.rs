//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a stock-keeping record.
///
/// Assigned from the inventory's counter; never zero and never reused within
/// a session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Id handed out first by an empty inventory.
    pub const FIRST: RecordId = RecordId(1);

    /// Wrap a raw identifier. Zero is not a valid record id.
    pub fn new(raw: u64) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// The identifier that follows this one, or `None` past `u64::MAX`.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<RecordId> for u64 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl TryFrom<u64> for RecordId {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| DomainError::invalid_state("record id must be positive"))
    }
}

impl FromStr for RecordId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<u64>()
            .map_err(|e| DomainError::invalid_state(format!("RecordId: {e}")))?;
        Self::try_from(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_not_a_record_id() {
        assert_eq!(RecordId::new(0), None);
        assert!(RecordId::try_from(0).is_err());
        assert!("0".parse::<RecordId>().is_err());
    }

    #[test]
    fn parses_and_displays() {
        let id: RecordId = " 42 ".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.next().map(RecordId::get), Some(43));
    }

    #[test]
    fn last_id_has_no_successor() {
        let last = RecordId::new(u64::MAX).unwrap();
        assert_eq!(last.next(), None);
    }

    #[test]
    fn serializes_as_bare_integer() {
        let id = RecordId::new(7).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
    }
}
