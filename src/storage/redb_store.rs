//! Durable store backed by redb, a pure-Rust embedded key-value database

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, TableDefinition};

use super::{KeyValueStore, StorageError};

const TABLE: TableDefinition<&str, &str> = TableDefinition::new("plantrack");

/// Each `set`/`remove` is a single committed write transaction, so a
/// collection blob is replaced atomically.
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a database file at the given path.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StorageError::Write(e.to_string()))?;
            }
        }

        let db = Database::create(path).map_err(|e| StorageError::Read(e.to_string()))?;

        // Make sure the table exists so that reads on a fresh file succeed.
        let write_txn = db
            .begin_write()
            .map_err(|e| StorageError::Write(e.to_string()))?;
        {
            let _table = write_txn
                .open_table(TABLE)
                .map_err(|e| StorageError::Write(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| StorageError::Write(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    fn get_blocking(db: &Database, key: &str) -> Result<Option<String>, StorageError> {
        let read_txn = db
            .begin_read()
            .map_err(|e| StorageError::Read(e.to_string()))?;
        let table = read_txn
            .open_table(TABLE)
            .map_err(|e| StorageError::Read(e.to_string()))?;

        let value = table
            .get(key)
            .map_err(|e| StorageError::Read(e.to_string()))?
            .map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn set_blocking(db: &Database, key: &str, value: &str) -> Result<(), StorageError> {
        let write_txn = db
            .begin_write()
            .map_err(|e| StorageError::Write(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| StorageError::Write(e.to_string()))?;
            table
                .insert(key, value)
                .map_err(|e| StorageError::Write(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| StorageError::Write(e.to_string()))
    }

    fn remove_blocking(db: &Database, key: &str) -> Result<(), StorageError> {
        let write_txn = db
            .begin_write()
            .map_err(|e| StorageError::Write(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| StorageError::Write(e.to_string()))?;
            table
                .remove(key)
                .map_err(|e| StorageError::Write(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| StorageError::Write(e.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for RedbStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let db = self.db.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || Self::get_blocking(&db, &key))
            .await
            .map_err(|e| StorageError::Read(e.to_string()))?
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let db = self.db.clone();
        let key = key.to_string();
        let value = value.to_string();
        tokio::task::spawn_blocking(move || Self::set_blocking(&db, &key, &value))
            .await
            .map_err(|e| StorageError::Write(e.to_string()))?
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let db = self.db.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || Self::remove_blocking(&db, &key))
            .await
            .map_err(|e| StorageError::Write(e.to_string()))?
    }
}
