//! A signed-in user's working session over the inventory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockroom_auth::{CredentialTable, UserProfile};
use stockroom_core::{Entity, RecordId};
use stockroom_inventory::{AdjustmentReport, AdjustmentRequest, Inventory, Record, parse_quantity};
use stockroom_storage::{InventoryStorage, StorageError};

use crate::error::AppError;
use crate::view::{Presenter, ViewMode, ViewModel};

/// Time-ordered session identifier, used to correlate log lines.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Result of a successful mutation.
///
/// The in-memory change has been applied either way; `storage_warning` is set
/// when persisting it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation<T> {
    pub value: T,
    pub storage_warning: Option<StorageError>,
}

impl<T> Mutation<T> {
    pub fn is_persisted(&self) -> bool {
        self.storage_warning.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Owns the inventory for one signed-in user and persists after every change.
#[derive(Debug)]
pub struct Session<S> {
    id: SessionId,
    user: UserProfile,
    started_at: DateTime<Utc>,
    last_saved_at: Option<DateTime<Utc>>,
    inventory: Inventory,
    storage: S,
    threshold: u64,
}

impl<S> Session<S>
where
    S: InventoryStorage,
{
    /// Authenticate against `credentials`, then open a session over `storage`.
    pub fn sign_in(
        credentials: &CredentialTable,
        username: &str,
        password: &str,
        storage: S,
        threshold: u64,
    ) -> Result<Self, AppError> {
        let user = credentials
            .authenticate(username, password)
            .ok_or(AppError::InvalidCredentials)?;
        Ok(Self::open(user, storage, threshold))
    }

    /// Open a session for an already-authenticated user, loading stored state.
    pub fn open(user: UserProfile, storage: S, threshold: u64) -> Self {
        let id = SessionId::new();
        let inventory = storage.load();
        tracing::info!(
            session = %id,
            user = %user.username,
            records = inventory.len(),
            threshold,
            "session opened"
        );

        Self {
            id,
            user,
            started_at: Utc::now(),
            last_saved_at: None,
            inventory,
            storage,
            threshold,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    pub fn add_record(&mut self, name: &str, quantity: i64) -> Result<Mutation<Record>, AppError> {
        let record = self.inventory.create(name, quantity)?;
        tracing::info!(session = %self.id, id = %record.id(), "product added");
        Ok(self.persist(record))
    }

    /// Add a record from raw form text.
    pub fn add_record_from_input(
        &mut self,
        name: &str,
        quantity: &str,
    ) -> Result<Mutation<Record>, AppError> {
        let quantity = parse_quantity(quantity)?;
        self.add_record(name, quantity)
    }

    /// Apply a batch; a save happens only when at least one entry succeeded.
    pub fn adjust_stock(
        &mut self,
        requests: impl IntoIterator<Item = AdjustmentRequest>,
    ) -> Mutation<AdjustmentReport> {
        let report = self.inventory.adjust_many(requests);
        tracing::info!(
            session = %self.id,
            succeeded = report.succeeded,
            failed = report.errors.len(),
            "stock adjusted"
        );

        if report.has_changes() {
            self.persist(report)
        } else {
            Mutation {
                value: report,
                storage_warning: None,
            }
        }
    }

    pub fn increase(&mut self, id: RecordId, amount: i64) -> Result<Mutation<Record>, AppError> {
        let record = self.inventory.increase(id, amount)?;
        Ok(self.persist(record))
    }

    pub fn decrease(&mut self, id: RecordId, amount: i64) -> Result<Mutation<Record>, AppError> {
        let record = self.inventory.decrease(id, amount)?;
        Ok(self.persist(record))
    }

    pub fn edit_record(
        &mut self,
        id: RecordId,
        name: &str,
        quantity: i64,
    ) -> Result<Mutation<Record>, AppError> {
        let record = self.inventory.edit(id, name, quantity)?;
        tracing::info!(session = %self.id, %id, "product edited");
        Ok(self.persist(record))
    }

    pub fn remove_record(&mut self, id: RecordId) -> Result<Mutation<()>, AppError> {
        self.inventory.delete(id)?;
        tracing::info!(session = %self.id, %id, "product removed");
        Ok(self.persist(()))
    }

    pub fn view(&self, mode: ViewMode, search: Option<&str>) -> ViewModel {
        ViewModel::project(&self.inventory, mode, self.threshold, search)
    }

    /// Project the current state and hand it to `presenter`.
    pub fn render_to<P: Presenter + ?Sized>(
        &self,
        presenter: &mut P,
        mode: ViewMode,
        search: Option<&str>,
    ) {
        presenter.render(&self.view(mode, search));
    }

    /// End the session, handing back the user and the final state.
    pub fn sign_out(self) -> (UserProfile, Inventory) {
        tracing::info!(session = %self.id, user = %self.user.username, "session closed");
        (self.user, self.inventory)
    }

    fn persist<T>(&mut self, value: T) -> Mutation<T> {
        match self.storage.save(&self.inventory) {
            Ok(()) => {
                self.last_saved_at = Some(Utc::now());
                Mutation {
                    value,
                    storage_warning: None,
                }
            }
            Err(err) => {
                tracing::warn!(session = %self.id, error = %err, "change kept in memory but not saved");
                Mutation {
                    value,
                    storage_warning: Some(err),
                }
            }
        }
    }
}
