//! Append-only change log storage

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    error::{AppError, AppResult},
    models::ChangeLog,
    storage::{KeyValueStore, CHANGELOG_KEY},
};

#[derive(Clone)]
pub struct ChangeLogRepository {
    store: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl ChangeLogRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    async fn load_raw(&self) -> AppResult<Vec<Value>> {
        match self.store.get(CHANGELOG_KEY).await? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                AppError::StorageUnavailable(format!("Change log is unreadable: {}", e))
            }),
            None => Ok(Vec::new()),
        }
    }

    /// All entries in append order
    pub async fn list(&self) -> AppResult<Vec<ChangeLog>> {
        let entries = self
            .load_raw()
            .await?
            .iter()
            .filter_map(|value| match ChangeLog::deserialize(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping undecodable change log entry: {}", e);
                    None
                }
            })
            .collect();
        Ok(entries)
    }

    /// Entries referring to one equipment record
    pub async fn list_for_equipment(&self, equipment_id: &str) -> AppResult<Vec<ChangeLog>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|entry| entry.equipment_id == equipment_id)
            .collect())
    }

    /// Append one entry. Existing entries are written back verbatim.
    pub async fn append(&self, entry: &ChangeLog) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.load_raw().await?;
        values.push(
            serde_json::to_value(entry)
                .map_err(|e| AppError::StorageWriteFailed(format!("Failed to encode change log: {}", e)))?,
        );
        let raw = serde_json::to_string(&values)
            .map_err(|e| AppError::StorageWriteFailed(format!("Failed to encode change log: {}", e)))?;
        self.store.set(CHANGELOG_KEY, &raw).await?;
        tracing::debug!(id = %entry.id, equipment_id = %entry.equipment_id, action = ?entry.action, "Change log appended");
        Ok(())
    }
}
