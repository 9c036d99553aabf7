//! Audit logger: builds and appends change log entries

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    clock::Clock,
    error::AppResult,
    models::{ChangeAction, ChangeLog},
    repository::Repository,
    services::device::DeviceInfoProvider,
};

#[derive(Clone)]
pub struct AuditLogger {
    repository: Repository,
    device: Arc<dyn DeviceInfoProvider>,
    clock: Arc<dyn Clock>,
}

impl AuditLogger {
    pub fn new(repository: Repository, device: Arc<dyn DeviceInfoProvider>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            device,
            clock,
        }
    }

    /// Build an entry stamped with the current time and device
    pub fn entry(&self, equipment_id: &str, action: ChangeAction, changes: serde_json::Value) -> ChangeLog {
        ChangeLog {
            id: Uuid::new_v4().to_string(),
            equipment_id: equipment_id.to_string(),
            action,
            timestamp: self.clock.now_millis(),
            changes,
            device_info: self.device.device_info(),
        }
    }

    pub async fn append(&self, entry: &ChangeLog) -> AppResult<()> {
        self.repository.change_logs.append(entry).await
    }

    /// Append without failing the caller; the record mutation has already
    /// been committed and is not rolled back.
    pub async fn record(&self, equipment_id: &str, action: ChangeAction, changes: serde_json::Value) {
        let entry = self.entry(equipment_id, action, changes);
        if let Err(e) = self.append(&entry).await {
            tracing::warn!(equipment_id, action = ?action, "Change log not written: {}", e);
        }
    }

    pub async fn list(&self) -> AppResult<Vec<ChangeLog>> {
        self.repository.change_logs.list().await
    }

    pub async fn history(&self, equipment_id: &str) -> AppResult<Vec<ChangeLog>> {
        self.repository.change_logs.list_for_equipment(equipment_id).await
    }
}
