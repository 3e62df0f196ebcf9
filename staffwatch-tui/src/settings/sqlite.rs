//! Preferences table in the console's SQLite database.
//!
//! The whole table is read once when the store opens. After that the
//! `DashMap` is authoritative for reads and every write goes through to disk
//! with the time it was made.

use std::path::Path;

use async_sqlite::{Client, ClientBuilder};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use log::debug;
use rusqlite::params;

use super::{SettingsBackend, SettingsError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS preferences (
    name TEXT PRIMARY KEY,
    value BLOB NOT NULL,
    updated_at TEXT NOT NULL
)";

pub struct SqliteBackend {
    client: Client,
    values: DashMap<String, Vec<u8>>,
}

impl SqliteBackend {
    /// Open (or create) the database at `path` and load every stored preference.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let client = ClientBuilder::new().path(path).open().await?;

        let stored = client
            .conn(|conn| {
                conn.execute(SCHEMA, [])?;
                let mut stmt = conn.prepare("SELECT name, value FROM preferences")?;
                let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?)))?;
                rows.collect::<Result<Vec<_>, _>>()
            })
            .await?;
        debug!("settings: loaded {} preferences", stored.len());

        Ok(Self {
            client,
            values: stored.into_iter().collect(),
        })
    }
}

#[async_trait]
impl SettingsBackend for SqliteBackend {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        Ok(self.values.get(key).map(|v| v.clone()))
    }

    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError> {
        if self.values.get(key).is_some_and(|current| *current == value) {
            return Ok(());
        }
        let name = key.to_string();
        let blob = value.clone();
        let stamp = Utc::now().to_rfc3339();
        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO preferences (name, value, updated_at) VALUES (?1, ?2, ?3)
                     ON CONFLICT(name) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                    params![name, blob, stamp],
                )
            })
            .await?;
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        if self.values.remove(key).is_none() {
            return Ok(());
        }
        let name = key.to_string();
        self.client
            .conn(move |conn| conn.execute("DELETE FROM preferences WHERE name = ?1", [name]))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn preferences_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.db");

        let store = SqliteBackend::open(&path).await.unwrap();
        store.set_bytes("table.rows_per_page", vec![50, 0, 0, 0]).await.unwrap();
        store.set_bytes("table.rows_per_page", vec![10, 0, 0, 0]).await.unwrap();
        store.set_bytes("table.sort", vec![1]).await.unwrap();
        store.delete("table.sort").await.unwrap();
        drop(store);

        let reopened = SqliteBackend::open(&path).await.unwrap();
        assert_eq!(
            reopened.get_bytes("table.rows_per_page").await.unwrap(),
            Some(vec![10, 0, 0, 0])
        );
        assert_eq!(reopened.get_bytes("table.sort").await.unwrap(), None);
    }

    #[tokio::test]
    async fn deleting_a_missing_key_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteBackend::open(dir.path().join("settings.db")).await.unwrap();
        store.delete("api.base_url").await.unwrap();
        assert_eq!(store.get_bytes("api.base_url").await.unwrap(), None);
    }
}
