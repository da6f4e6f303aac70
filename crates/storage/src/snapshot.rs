//! Persisted inventory schema.
//!
//! The inventory is stored as a JSON array of `{"id", "name", "quantity"}`
//! objects in display order. Parsing is strict: unknown fields, negative or
//! fractional quantities, zero or duplicate ids and blank names are all
//! rejected.

use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, RecordId};
use stockroom_inventory::{Inventory, Record};

use crate::error::DecodeError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoredRecord {
    pub id: u64,
    pub name: String,
    pub quantity: u64,
}

impl From<&Record> for StoredRecord {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id().get(),
            name: record.name().to_string(),
            quantity: record.quantity(),
        }
    }
}

impl TryFrom<StoredRecord> for Record {
    type Error = DecodeError;

    fn try_from(stored: StoredRecord) -> Result<Self, Self::Error> {
        let id = RecordId::new(stored.id)
            .ok_or_else(|| DecodeError::Invalid("record id must be positive".to_string()))?;
        Record::new(id, &stored.name, stored.quantity)
            .map_err(|e| DecodeError::Invalid(format!("record {id}: {e}")))
    }
}

pub fn encode_inventory(inventory: &Inventory) -> Result<String, serde_json::Error> {
    let records: Vec<StoredRecord> = inventory.records().iter().map(StoredRecord::from).collect();
    serde_json::to_string(&records)
}

pub fn decode_inventory(raw: &str) -> Result<Inventory, DecodeError> {
    let stored: Vec<StoredRecord> = serde_json::from_str(raw)?;
    let records = stored
        .into_iter()
        .map(Record::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Inventory::from_records(records).map_err(|e| DecodeError::Invalid(e.to_string()))
}
