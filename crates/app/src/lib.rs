//! `stockroom-app`
//!
//! **Responsibility:** the session layer between a UI and the inventory core.
//!
//! This crate provides:
//! - Configuration loading (file + environment)
//! - A `Session` that owns the inventory, persists after every mutation and
//!   reports storage failures as warnings
//! - A pure view-model projection for rendering
//! - User-facing messages for errors and batch reports
//!
//! The UI is a **thin shell** around `Session`; nothing here draws anything.

pub mod config;
pub mod error;
pub mod messages;
pub mod session;
pub mod view;

use std::sync::Arc;

use stockroom_auth::CredentialTable;
use stockroom_storage::{InventoryRepository, KeyValueStore};

pub use config::{AppConfig, StorageBackend, StorageConfig};
pub use error::AppError;
pub use messages::UserMessage;
pub use session::{Mutation, Session, SessionId};
pub use view::{Presenter, RecordRow, ViewMode, ViewModel};

/// Repository type produced from configuration.
pub type ConfiguredRepository = InventoryRepository<Arc<dyn KeyValueStore>>;

/// Configured application: credential table plus the storage sessions use.
pub struct App {
    config: AppConfig,
    credentials: CredentialTable,
    store: Arc<dyn KeyValueStore>,
}

impl App {
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let credentials = config.credential_table();
        let store = config.storage.open()?;
        Ok(Self {
            config,
            credentials,
            store,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Authenticate and open a session over the configured storage.
    pub fn sign_in(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Session<ConfiguredRepository>, AppError> {
        let repository =
            InventoryRepository::with_key(Arc::clone(&self.store), self.config.storage.key.clone());
        Session::sign_in(
            &self.credentials,
            username,
            password,
            repository,
            self.config.low_stock_threshold,
        )
    }
}

/// Load configuration from the environment, initialise logging and build the app.
pub fn bootstrap() -> anyhow::Result<App> {
    let config = AppConfig::load()?;
    stockroom_observability::init_with(config.log_format);
    tracing::info!(
        threshold = config.low_stock_threshold,
        backend = ?config.storage.backend,
        "stockroom configured"
    );
    App::from_config(config)
}
