//! `stockroom-storage`
//!
//! **Responsibility:** local persistence for the inventory.
//!
//! This crate provides:
//! - A key-value store abstraction (in-memory and file-backed)
//! - The strict JSON schema used to persist records
//! - `InventoryRepository`, the load/save collaborator used by sessions
//!
//! Corrupt or schema-violating data is treated as absent, never as a crash.

pub mod error;
pub mod kv;
pub mod repository;
pub mod snapshot;

pub use error::{DecodeError, StorageError};
pub use kv::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
pub use repository::{DEFAULT_INVENTORY_KEY, InventoryRepository, InventoryStorage};
pub use snapshot::{StoredRecord, decode_inventory, encode_inventory};
