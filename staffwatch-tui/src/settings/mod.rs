//! Typed settings persisted between runs.

mod backend;
mod sqlite;

pub use backend::{MemoryBackend, SettingsBackend};
pub use sqlite::SqliteBackend;

use std::sync::Arc;

use log::warn;
use serde::{Serialize, de::DeserializeOwned};
use staffgrid::SortOrder;
use staffgrid::pagination::DEFAULT_ROWS_PER_PAGE_OPTIONS;
use thiserror::Error;

pub const ROWS_PER_PAGE: &str = "table.rows_per_page";
pub const SORT: &str = "table.sort";
pub const API_BASE_URL: &str = "api.base_url";

pub const DEFAULT_ROWS_PER_PAGE: u32 = 25;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
}

/// Bincode-typed view over a [`SettingsBackend`].
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsProvider {
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        match self.backend.get_bytes(key).await? {
            Some(bytes) => Ok(Some(
                bincode::deserialize(&bytes).map_err(SettingsError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let bytes = bincode::serialize(value).map_err(SettingsError::Serialization)?;
        self.backend.set_bytes(key, bytes).await
    }

    /// Read a key, logging and falling back to `None` when it cannot be read.
    async fn get_logged<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("settings: could not read {}: {}", key, e);
                None
            }
        }
    }

    /// Everything the console restores at startup.
    pub async fn load_table(&self) -> TableSettings {
        let rows_per_page = self
            .get_logged::<u32>(ROWS_PER_PAGE)
            .await
            .filter(|n| DEFAULT_ROWS_PER_PAGE_OPTIONS.contains(n))
            .unwrap_or(DEFAULT_ROWS_PER_PAGE);
        let sort = self.get_logged::<(String, SortOrder)>(SORT).await;
        let base_url = self.get_logged::<String>(API_BASE_URL).await;
        TableSettings {
            rows_per_page,
            sort,
            base_url,
        }
    }

    /// Unset optional values are removed rather than stored.
    pub async fn save_table(&self, table: &TableSettings) -> Result<(), SettingsError> {
        self.set(ROWS_PER_PAGE, &table.rows_per_page).await?;
        self.set_or_delete(SORT, table.sort.as_ref()).await?;
        self.set_or_delete(API_BASE_URL, table.base_url.as_ref()).await
    }

    async fn set_or_delete<T: Serialize + Sync>(&self, key: &str, value: Option<&T>) -> Result<(), SettingsError> {
        match value {
            Some(value) => self.set(key, value).await,
            None => self.backend.delete(key).await,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSettings {
    pub rows_per_page: u32,
    pub sort: Option<(String, SortOrder)>,
    pub base_url: Option<String>,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            sort: None,
            base_url: None,
        }
    }
}
