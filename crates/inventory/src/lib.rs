//! Inventory domain module.
//!
//! This crate contains business rules for stock-keeping records, implemented
//! purely as deterministic domain logic (no IO, no rendering, no storage).

pub mod adjustment;
pub mod inventory;
pub mod record;
pub mod stock_level;

pub use adjustment::{AdjustmentError, AdjustmentReport, AdjustmentRequest, Direction};
pub use inventory::{
    AdjustStock, CreateRecord, DeleteRecord, EditRecord, Inventory, InventoryCommand,
    InventoryEvent, LowStock, LowStockIter, RecordCreated, RecordDeleted, RecordEdited,
    StockAdjusted,
};
pub use record::{Record, parse_amount, parse_quantity};
pub use stock_level::{DEFAULT_LOW_STOCK_THRESHOLD, StockStatus, StockSummary};
