//! Configuration loading and representation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use stockroom_auth::CredentialTable;
use stockroom_inventory::DEFAULT_LOW_STOCK_THRESHOLD;
use stockroom_observability::LogFormat;
use stockroom_storage::{DEFAULT_INVENTORY_KEY, FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};

/// Path of an optional JSON configuration file.
pub const CONFIG_PATH_VAR: &str = "STOCKROOM_CONFIG";
pub const THRESHOLD_VAR: &str = "STOCKROOM_LOW_STOCK_THRESHOLD";
pub const DATA_DIR_VAR: &str = "STOCKROOM_DATA_DIR";
pub const STORAGE_KEY_VAR: &str = "STOCKROOM_STORAGE_KEY";
pub const LOG_FORMAT_VAR: &str = "STOCKROOM_LOG_FORMAT";

/// Application configuration. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub low_stock_threshold: u64,
    pub storage: StorageConfig,
    pub credentials: CredentialTable,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            storage: StorageConfig::default(),
            credentials: CredentialTable::default(),
            log_format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Nothing survives the process (tests, demos).
    Memory,
    #[default]
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory for the file backend; the OS data directory when unset.
    pub data_dir: Option<PathBuf>,
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: None,
            key: DEFAULT_INVENTORY_KEY.to_string(),
        }
    }
}

impl StorageConfig {
    /// Open the configured key-value store.
    pub fn open(&self) -> anyhow::Result<Arc<dyn KeyValueStore>> {
        Ok(match self.backend {
            StorageBackend::Memory => Arc::new(InMemoryKeyValueStore::new()),
            StorageBackend::File => {
                let store = match &self.data_dir {
                    Some(dir) => FileKeyValueStore::new(dir),
                    None => FileKeyValueStore::in_default_location()
                        .context("failed to resolve default data directory")?,
                };
                tracing::debug!(dir = %store.dir().display(), "using file storage");
                Arc::new(store)
            }
        })
    }
}

impl AppConfig {
    /// Defaults, then the file named by `STOCKROOM_CONFIG`, then env overrides.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::load`] with an injected variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(&lookup)?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(raw) = lookup(THRESHOLD_VAR) {
            self.low_stock_threshold = raw
                .trim()
                .parse()
                .with_context(|| format!("{THRESHOLD_VAR} must be a non-negative integer, got {raw:?}"))?;
        }
        if let Some(dir) = lookup(DATA_DIR_VAR) {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(key) = lookup(STORAGE_KEY_VAR) {
            self.storage.key = key;
        }
        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            self.log_format = raw
                .parse()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("invalid {LOG_FORMAT_VAR}"))?;
        }
        Ok(())
    }

    /// Configured accounts, or the demo account when none are configured.
    pub fn credential_table(&self) -> CredentialTable {
        if self.credentials.is_empty() {
            tracing::warn!("no credentials configured; using built-in demo account");
            CredentialTable::demo()
        } else {
            self.credentials.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    fn scratch_file(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("stockroom-config-{}.json", uuid::Uuid::now_v7()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults_without_any_source() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.low_stock_threshold, 10);
        assert_eq!(config.storage.key, "inventory");
        assert_eq!(config.storage.backend, StorageBackend::File);
    }

    #[test]
    fn env_overrides_apply() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (THRESHOLD_VAR, " 25 "),
            (DATA_DIR_VAR, "/tmp/stockroom-data"),
            (STORAGE_KEY_VAR, "warehouse"),
            (LOG_FORMAT_VAR, "pretty"),
        ]))
        .unwrap();
        assert_eq!(config.low_stock_threshold, 25);
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/stockroom-data")));
        assert_eq!(config.storage.key, "warehouse");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn bad_threshold_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[(THRESHOLD_VAR, "-1")])).unwrap_err();
        assert!(format!("{err:#}").contains(THRESHOLD_VAR));
    }

    #[test]
    fn file_then_env() {
        let path = scratch_file(
            r#"{
                "low_stock_threshold": 5,
                "storage": { "backend": "memory" },
                "credentials": [{ "username": "ops", "password": "pw" }]
            }"#,
        );
        let path_str = path.to_string_lossy().to_string();
        let config = AppConfig::from_lookup(lookup_from(&[
            (CONFIG_PATH_VAR, path_str.as_str()),
            (STORAGE_KEY_VAR, "alt"),
        ]))
        .unwrap();

        assert_eq!(config.low_stock_threshold, 5);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.key, "alt");
        assert!(config.credential_table().authenticate("ops", "pw").is_some());
        assert!(config.credential_table().authenticate("admin", "admin").is_none());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn unknown_fields_in_file_are_rejected() {
        let path = scratch_file(r#"{ "dark_mode": true }"#);
        assert!(AppConfig::from_file(&path).is_err());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
    }

    #[test]
    fn empty_credentials_fall_back_to_demo() {
        let config = AppConfig::default();
        assert!(config.credential_table().authenticate("admin", "admin").is_some());
    }

    #[test]
    fn memory_backend_opens() {
        let storage = StorageConfig {
            backend: StorageBackend::Memory,
            ..StorageConfig::default()
        };
        let store = storage.open().unwrap();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
