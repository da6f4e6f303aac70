//! Pure projection from inventory state to what a UI displays.

use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, RecordId};
use stockroom_inventory::{Inventory, Record, StockStatus, StockSummary};

/// Which records a view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    All,
    LowStockOnly,
}

/// One displayed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRow {
    pub id: RecordId,
    pub name: String,
    pub quantity: u64,
    pub status: StockStatus,
    pub status_label: &'static str,
}

impl RecordRow {
    fn new(record: &Record, threshold: u64) -> Self {
        let status = StockStatus::classify(record.quantity(), threshold);
        Self {
            id: record.id(),
            name: record.name().to_string(),
            quantity: record.quantity(),
            status,
            status_label: status.label(),
        }
    }
}

/// Everything needed to draw the inventory screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub mode: ViewMode,
    pub threshold: u64,
    pub search: Option<String>,
    pub rows: Vec<RecordRow>,
    /// Counts over the whole inventory, independent of mode and search.
    pub summary: StockSummary,
    /// Shown instead of the table when `rows` is empty.
    pub empty_message: Option<String>,
}

impl ViewModel {
    pub fn project(
        inventory: &Inventory,
        mode: ViewMode,
        threshold: u64,
        search: Option<&str>,
    ) -> Self {
        let search = search
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string);

        let query = search.as_deref().unwrap_or("");
        let rows: Vec<RecordRow> = match mode {
            ViewMode::All => inventory
                .search(query)
                .map(|r| RecordRow::new(r, threshold))
                .collect(),
            ViewMode::LowStockOnly => inventory
                .low_stock(threshold)
                .iter()
                .filter(|r| r.name_matches(query))
                .map(|r| RecordRow::new(r, threshold))
                .collect(),
        };

        let empty_message = rows
            .is_empty()
            .then(|| empty_message(inventory, mode, search.as_deref()));

        Self {
            mode,
            threshold,
            search,
            rows,
            summary: inventory.summary(threshold),
            empty_message,
        }
    }
}

fn empty_message(inventory: &Inventory, mode: ViewMode, search: Option<&str>) -> String {
    if let Some(query) = search {
        return format!("No products match \"{query}\".");
    }
    match mode {
        _ if inventory.is_empty() => "No products yet. Add one to get started.".to_string(),
        ViewMode::All => "No products to show.".to_string(),
        ViewMode::LowStockOnly => "All products are sufficiently stocked.".to_string(),
    }
}

/// Presentation callback: receives a fresh projection after each change.
pub trait Presenter {
    fn render(&mut self, view: &ViewModel);
}
