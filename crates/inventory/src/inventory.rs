use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use stockroom_core::entity::position_of;
use stockroom_core::{Aggregate, DomainError, DomainResult, Entity, RecordId};

use crate::adjustment::{AdjustmentError, AdjustmentReport, AdjustmentRequest, Direction};
use crate::record::{Record, validate_amount, validate_name, validate_quantity};
use crate::stock_level::{StockStatus, StockSummary};

/// Aggregate root: the ordered collection of stock-keeping records.
///
/// # Invariants
/// - Record ids are unique and never zero.
/// - `next_id` is greater than every id assigned since the inventory was loaded,
///   including ids of records that were later deleted. It is `None` once the
///   id space is exhausted.
/// - Quantities are unsigned; no operation can drive one below zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    records: Vec<Record>,
    next_id: Option<RecordId>,
    version: u64,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::empty()
    }
}

impl Inventory {
    /// An inventory with no records; the first id handed out is 1.
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            next_id: Some(RecordId::FIRST),
            version: 0,
        }
    }

    /// Default data used when nothing usable has been persisted yet.
    pub fn seeded() -> Self {
        let seed = [
            (1, "Industrial Steel Bracket", 15),
            (2, "Bulk Fastener (M8)", 4),
            (3, "Hydraulic Hose Assembly", 50),
        ];
        let records = seed
            .into_iter()
            .filter_map(|(id, name, quantity)| {
                let id = RecordId::new(id)?;
                Record::new(id, name, quantity).ok()
            })
            .collect();

        Self::rebuilt(records)
    }

    /// Rebuild an inventory from persisted records, preserving their order.
    ///
    /// Rejects duplicate ids. `next_id` is seeded to one past the highest id.
    pub fn from_records(records: Vec<Record>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(DomainError::invalid_state(format!(
                    "duplicate record id {}",
                    record.id()
                )));
            }
        }
        Ok(Self::rebuilt(records))
    }

    fn rebuilt(records: Vec<Record>) -> Self {
        let next_id = records
            .iter()
            .map(|r| r.id())
            .max()
            .map_or(Some(RecordId::FIRST), RecordId::next);

        Self {
            records,
            next_id,
            version: 0,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next created record will receive, or `None` when ids are exhausted.
    pub fn next_id(&self) -> Option<RecordId> {
        self.next_id
    }

    /// Records at or below `threshold`, in collection order.
    pub fn low_stock(&self, threshold: u64) -> LowStock<'_> {
        LowStock {
            records: &self.records,
            threshold,
        }
    }

    /// Case-insensitive substring search on record names. A blank query matches all.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Record> + use<'a> {
        let query = query.trim().to_string();
        self.records.iter().filter(move |r| r.name_matches(&query))
    }

    pub fn summary(&self, threshold: u64) -> StockSummary {
        StockSummary::of(&self.records, threshold)
    }

    /// Add a new record. Returns the created record.
    pub fn create(&mut self, name: &str, quantity: i64) -> DomainResult<Record> {
        let command = InventoryCommand::CreateRecord(CreateRecord {
            name: name.to_string(),
            quantity,
        });
        let events = self.execute(&command)?;
        self.record_from(&events)
    }

    /// Apply a batch of adjustments, continuing past per-entry failures.
    pub fn adjust_many(
        &mut self,
        requests: impl IntoIterator<Item = AdjustmentRequest>,
    ) -> AdjustmentReport {
        let requests: Vec<AdjustmentRequest> = requests.into_iter().collect();
        let events = self.decide_adjustments(&requests);

        let mut report = AdjustmentReport::default();
        for event in &events {
            match event {
                InventoryEvent::StockAdjusted(_) => report.succeeded += 1,
                InventoryEvent::AdjustmentRejected(err) => report.errors.push(err.clone()),
                _ => {}
            }
            self.apply(event);
        }

        tracing::debug!(
            entries = requests.len(),
            succeeded = report.succeeded,
            failed = report.errors.len(),
            "batch stock adjustment processed"
        );
        report
    }

    /// Add `amount` units to one record.
    pub fn increase(&mut self, id: RecordId, amount: i64) -> DomainResult<Record> {
        self.adjust_one(id, amount, Direction::Increase)
    }

    /// Remove `amount` units from one record; fails without change if fewer are on hand.
    pub fn decrease(&mut self, id: RecordId, amount: i64) -> DomainResult<Record> {
        self.adjust_one(id, amount, Direction::Decrease)
    }

    fn adjust_one(&mut self, id: RecordId, amount: i64, direction: Direction) -> DomainResult<Record> {
        validate_amount(amount)?;
        if self.get(id).is_none() {
            return Err(DomainError::not_found(id));
        }

        let request = AdjustmentRequest::new(id.get(), amount, direction);
        let events = self.execute(&InventoryCommand::AdjustStock(AdjustStock {
            requests: vec![request],
        }))?;

        if let Some(InventoryEvent::AdjustmentRejected(err)) = events.first() {
            return Err(err.clone().into());
        }
        self.get(id).cloned().ok_or_else(|| DomainError::not_found(id))
    }

    /// Replace a record's name and quantity. Returns the updated record.
    pub fn edit(&mut self, id: RecordId, name: &str, quantity: i64) -> DomainResult<Record> {
        let command = InventoryCommand::EditRecord(EditRecord {
            id,
            name: name.to_string(),
            quantity,
        });
        let events = self.execute(&command)?;
        self.record_from(&events)
    }

    /// Permanently remove a record. Its id is never handed out again.
    pub fn delete(&mut self, id: RecordId) -> DomainResult<()> {
        self.execute(&InventoryCommand::DeleteRecord(DeleteRecord { id }))?;
        Ok(())
    }

    fn record_from(&self, events: &[InventoryEvent]) -> DomainResult<Record> {
        let id = events
            .iter()
            .find_map(InventoryEvent::record_id)
            .ok_or_else(|| DomainError::invalid_state("command produced no event"))?;
        self.get(id).cloned().ok_or_else(|| DomainError::not_found(id))
    }
}

/// Lazy, restartable view over low-stock records.
#[derive(Debug, Clone, Copy)]
pub struct LowStock<'a> {
    records: &'a [Record],
    threshold: u64,
}

impl<'a> LowStock<'a> {
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Start a fresh pass over the view.
    pub fn iter(&self) -> LowStockIter<'a> {
        LowStockIter {
            inner: self.records.iter(),
            threshold: self.threshold,
        }
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<'a> IntoIterator for LowStock<'a> {
    type Item = &'a Record;
    type IntoIter = LowStockIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct LowStockIter<'a> {
    inner: std::slice::Iter<'a, Record>,
    threshold: u64,
}

impl<'a> Iterator for LowStockIter<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let threshold = self.threshold;
        self.inner
            .find(|r| StockStatus::classify(r.quantity(), threshold).needs_attention())
    }
}

/// Command: CreateRecord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRecord {
    pub name: String,
    pub quantity: i64,
}

/// Command: AdjustStock (batch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustStock {
    pub requests: Vec<AdjustmentRequest>,
}

/// Command: EditRecord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRecord {
    pub id: RecordId,
    pub name: String,
    pub quantity: i64,
}

/// Command: DeleteRecord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRecord {
    pub id: RecordId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryCommand {
    CreateRecord(CreateRecord),
    AdjustStock(AdjustStock),
    EditRecord(EditRecord),
    DeleteRecord(DeleteRecord),
}

/// Event: RecordCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCreated {
    pub id: RecordId,
    pub name: String,
    pub quantity: u64,
}

/// Event: StockAdjusted. `quantity` is the resulting level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjusted {
    pub id: RecordId,
    pub direction: Direction,
    pub amount: u64,
    pub quantity: u64,
}

/// Event: RecordEdited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEdited {
    pub id: RecordId,
    pub name: String,
    pub quantity: u64,
}

/// Event: RecordDeleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDeleted {
    pub id: RecordId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    RecordCreated(RecordCreated),
    StockAdjusted(StockAdjusted),
    /// A batch entry that targeted a record but could not be applied.
    /// Carried for reporting; leaves state untouched.
    AdjustmentRejected(AdjustmentError),
    RecordEdited(RecordEdited),
    RecordDeleted(RecordDeleted),
}

impl InventoryEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::RecordCreated(_) => "inventory.record.created",
            InventoryEvent::StockAdjusted(_) => "inventory.record.stock_adjusted",
            InventoryEvent::AdjustmentRejected(_) => "inventory.record.adjustment_rejected",
            InventoryEvent::RecordEdited(_) => "inventory.record.edited",
            InventoryEvent::RecordDeleted(_) => "inventory.record.deleted",
        }
    }

    pub fn changes_state(&self) -> bool {
        !matches!(self, InventoryEvent::AdjustmentRejected(_))
    }

    pub fn record_id(&self) -> Option<RecordId> {
        match self {
            InventoryEvent::RecordCreated(e) => Some(e.id),
            InventoryEvent::StockAdjusted(e) => Some(e.id),
            InventoryEvent::AdjustmentRejected(e) => Some(e.id()),
            InventoryEvent::RecordEdited(e) => Some(e.id),
            InventoryEvent::RecordDeleted(e) => Some(e.id),
        }
    }
}

impl Aggregate for Inventory {
    type Command = InventoryCommand;
    type Event = InventoryEvent;
    type Error = DomainError;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        if !event.changes_state() {
            return;
        }

        match event {
            InventoryEvent::RecordCreated(e) => {
                self.records
                    .push(Record::from_parts(e.id, e.name.clone(), e.quantity));
                if self.next_id.is_some_and(|next| e.id >= next) {
                    self.next_id = e.id.next();
                }
            }
            InventoryEvent::StockAdjusted(e) => {
                if let Some(record) = self.records.iter_mut().find(|r| r.id() == e.id) {
                    record.set_quantity(e.quantity);
                }
            }
            InventoryEvent::AdjustmentRejected(_) => {}
            InventoryEvent::RecordEdited(e) => {
                if let Some(record) = self.records.iter_mut().find(|r| r.id() == e.id) {
                    record.rename(e.name.clone());
                    record.set_quantity(e.quantity);
                }
            }
            InventoryEvent::RecordDeleted(e) => {
                self.records.retain(|r| r.id() != e.id);
            }
        }

        // +1 per applied state-changing event.
        self.version += 1;
        tracing::trace!(event = event.event_type(), version = self.version, "inventory event applied");
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InventoryCommand::CreateRecord(cmd) => self.handle_create(cmd),
            InventoryCommand::AdjustStock(cmd) => Ok(self.decide_adjustments(&cmd.requests)),
            InventoryCommand::EditRecord(cmd) => self.handle_edit(cmd),
            InventoryCommand::DeleteRecord(cmd) => self.handle_delete(cmd),
        }
    }
}

impl Inventory {
    fn handle_create(&self, cmd: &CreateRecord) -> DomainResult<Vec<InventoryEvent>> {
        let name = validate_name(&cmd.name)?;
        let quantity = validate_quantity(cmd.quantity)?;
        let id = self
            .next_id
            .ok_or_else(|| DomainError::invalid_state("record ids exhausted"))?;
        Ok(vec![InventoryEvent::RecordCreated(RecordCreated {
            id,
            name,
            quantity,
        })])
    }

    /// Decide the outcome of every batch entry against a running projection of
    /// quantities, so repeated ids in one batch see earlier entries' effects.
    fn decide_adjustments(&self, requests: &[AdjustmentRequest]) -> Vec<InventoryEvent> {
        let mut projected: HashMap<RecordId, u64> = HashMap::new();
        let mut events = Vec::new();

        for request in requests {
            let Some((id, amount)) = request.actionable() else {
                continue;
            };
            let Some(index) = position_of(&self.records, id) else {
                continue;
            };
            let record = &self.records[index];
            let current = projected.get(&id).copied().unwrap_or(record.quantity());

            let next = match request.direction {
                Direction::Increase => current.checked_add(amount).ok_or_else(|| {
                    AdjustmentError::QuantityOverflow {
                        id,
                        name: record.name().to_string(),
                    }
                }),
                Direction::Decrease => {
                    current
                        .checked_sub(amount)
                        .ok_or_else(|| AdjustmentError::InsufficientStock {
                            id,
                            name: record.name().to_string(),
                            available: current,
                        })
                }
            };

            match next {
                Ok(quantity) => {
                    projected.insert(id, quantity);
                    events.push(InventoryEvent::StockAdjusted(StockAdjusted {
                        id,
                        direction: request.direction,
                        amount,
                        quantity,
                    }));
                }
                Err(err) => events.push(InventoryEvent::AdjustmentRejected(err)),
            }
        }

        events
    }

    fn handle_edit(&self, cmd: &EditRecord) -> DomainResult<Vec<InventoryEvent>> {
        let name = validate_name(&cmd.name)?;
        let quantity = validate_quantity(cmd.quantity)?;
        if self.get(cmd.id).is_none() {
            return Err(DomainError::not_found(cmd.id));
        }
        Ok(vec![InventoryEvent::RecordEdited(RecordEdited {
            id: cmd.id,
            name,
            quantity,
        })])
    }

    fn handle_delete(&self, cmd: &DeleteRecord) -> DomainResult<Vec<InventoryEvent>> {
        if self.get(cmd.id).is_none() {
            return Err(DomainError::not_found(cmd.id));
        }
        Ok(vec![InventoryEvent::RecordDeleted(RecordDeleted { id: cmd.id })])
    }
}
