//! Low-stock classification.

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Quantity at or below which a record counts as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u64 = 10;

/// Stock level of a record relative to a threshold. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn classify(quantity: u64, threshold: u64) -> Self {
        if quantity == 0 {
            StockStatus::OutOfStock
        } else if quantity <= threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    /// Low or out of stock.
    pub fn needs_attention(self) -> bool {
        !matches!(self, StockStatus::InStock)
    }

    pub fn label(self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregate counts over an inventory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSummary {
    pub total_records: usize,
    pub total_units: u64,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl StockSummary {
    pub fn of<'a>(records: impl IntoIterator<Item = &'a Record>, threshold: u64) -> Self {
        records
            .into_iter()
            .fold(StockSummary::default(), |mut acc, record| {
                acc.total_records += 1;
                acc.total_units = acc.total_units.saturating_add(record.quantity());
                match StockStatus::classify(record.quantity(), threshold) {
                    StockStatus::LowStock => acc.low_stock += 1,
                    StockStatus::OutOfStock => acc.out_of_stock += 1,
                    StockStatus::InStock => {}
                }
                acc
            })
    }
}
