//! Key-value stores backing persistence.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use anyhow::{Context, bail};

use crate::error::StorageError;

/// String key/value store abstraction (the shape of browser local storage).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StorageError::new("in-memory store lock poisoned"))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StorageError::new("in-memory store lock poisoned"))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StorageError::new("in-memory store lock poisoned"))?;
        map.remove(key);
        Ok(())
    }
}

/// File-backed store: one `<key>.json` file per key inside a data directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `{app_data_dir}/stockroom`.
    pub fn in_default_location() -> anyhow::Result<Self> {
        Ok(Self::new(default_data_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> anyhow::Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            bail!("invalid storage key {key:?}: use letters, digits, '-' or '_'");
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create data directory at {}", self.dir.display()))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("failed to move {} into place", path.display()))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> anyhow::Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("failed to remove {}", path.display())),
        }
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read(key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Ok(self.write(key, value)?)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Ok(self.delete(key)?)
    }
}

/// Resolve the default data directory: `{app_data_dir}/stockroom`.
fn default_data_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    Ok(base.join("stockroom"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("stockroom-kv-{}", uuid::Uuid::now_v7()))
    }

    #[test]
    fn in_memory_set_get_remove() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("inventory").unwrap(), None);
        store.set("inventory", "[]").unwrap();
        assert_eq!(store.get("inventory").unwrap().as_deref(), Some("[]"));
        store.remove("inventory").unwrap();
        assert_eq!(store.get("inventory").unwrap(), None);
    }

    #[test]
    fn arc_store_delegates() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let shared = Arc::clone(&store);
        shared.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn file_store_round_trips_and_creates_directory() {
        let dir = scratch_dir();
        let store = FileKeyValueStore::new(&dir);

        assert_eq!(store.get("inventory").unwrap(), None);
        store.set("inventory", r#"[{"id":1}]"#).unwrap();
        assert!(dir.join("inventory.json").exists());
        assert!(!dir.join("inventory.json.tmp").exists());
        assert_eq!(
            store.get("inventory").unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );

        store.set("inventory", "[]").unwrap();
        assert_eq!(store.get("inventory").unwrap().as_deref(), Some("[]"));

        store.remove("inventory").unwrap();
        store.remove("inventory").unwrap();
        assert_eq!(store.get("inventory").unwrap(), None);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let store = FileKeyValueStore::new(scratch_dir());
        let err = store.set("../escape", "x").unwrap_err();
        assert!(err.cause.contains("invalid storage key"));
        assert!(store.get("").is_err());
    }
}
