//! Inventory load/save collaborator.

use stockroom_inventory::Inventory;

use crate::error::StorageError;
use crate::kv::KeyValueStore;
use crate::snapshot::{decode_inventory, encode_inventory};

/// Storage key the inventory lives under unless configured otherwise.
pub const DEFAULT_INVENTORY_KEY: &str = "inventory";

/// Persistence collaborator consumed by sessions.
pub trait InventoryStorage {
    /// Previously saved inventory, or the default seed when nothing usable is stored.
    fn load(&self) -> Inventory;

    /// Best-effort save. Failures are surfaced to the user as warnings.
    fn save(&self, inventory: &Inventory) -> Result<(), StorageError>;
}

/// Stores the inventory as a JSON document under one key of a [`KeyValueStore`].
#[derive(Debug)]
pub struct InventoryRepository<S> {
    store: S,
    key: String,
}

impl<S> InventoryRepository<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_INVENTORY_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Forget the stored inventory; the next load falls back to the seed.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(&self.key)
    }
}

impl<S> InventoryStorage for InventoryRepository<S>
where
    S: KeyValueStore,
{
    fn load(&self) -> Inventory {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no stored inventory; using default seed");
                return Inventory::seeded();
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "failed to read stored inventory; using default seed");
                return Inventory::seeded();
            }
        };

        match decode_inventory(&raw) {
            Ok(inventory) => {
                tracing::debug!(key = %self.key, records = inventory.len(), "stored inventory loaded");
                inventory
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "stored inventory is corrupt; using default seed");
                Inventory::seeded()
            }
        }
    }

    fn save(&self, inventory: &Inventory) -> Result<(), StorageError> {
        let payload = encode_inventory(inventory)
            .map_err(|e| StorageError::new(format!("failed to serialize inventory: {e}")))?;
        self.store.set(&self.key, &payload)?;
        tracing::debug!(key = %self.key, records = inventory.len(), "inventory saved");
        Ok(())
    }
}
