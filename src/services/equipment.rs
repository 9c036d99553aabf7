//! Equipment service: add, edit and delete flows
//!
//! Each flow validates at the boundary, mutates the record store, then
//! appends a change log entry and emits a notification. The last two are
//! best-effort and never undo the mutation.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    clock::Clock,
    error::{AppError, AppResult},
    models::{ChangeAction, CreateEquipment, DeleteEquipment, Equipment, EquipmentQuery, UpdateEquipment},
    repository::{equipment::EquipmentRevision, Repository},
    services::{
        audit::AuditLogger,
        notifications::{Notification, Notifier},
        settings::SettingsService,
    },
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
    audit: AuditLogger,
    notifier: Notifier,
    settings: SettingsService,
    clock: Arc<dyn Clock>,
}

impl EquipmentService {
    pub fn new(
        repository: Repository,
        audit: AuditLogger,
        notifier: Notifier,
        settings: SettingsService,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            audit,
            notifier,
            settings,
            clock,
        }
    }

    /// Every stored record, soft-deleted included
    pub async fn get_all(&self) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list().await
    }

    /// Every stored record; an unreadable medium reads as empty and is logged
    pub async fn get_all_or_empty(&self) -> Vec<Equipment> {
        match self.get_all().await {
            Ok(all) => all,
            Err(e) => {
                tracing::error!("Equipment collection unavailable, continuing with none: {}", e);
                Vec::new()
            }
        }
    }

    /// Active records only, degraded to empty on read failure
    pub async fn active_or_empty(&self) -> Vec<Equipment> {
        self.get_all_or_empty()
            .await
            .into_iter()
            .filter(Equipment::is_active)
            .collect()
    }

    /// List equipment for the list screen
    pub async fn list(&self, query: &EquipmentQuery) -> Vec<Equipment> {
        let records = if query.include_deleted {
            self.get_all_or_empty().await
        } else {
            self.active_or_empty().await
        };

        match query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => {
                let q = q.to_lowercase();
                records.into_iter().filter(|e| e.matches(&q)).collect()
            }
            None => records,
        }
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Equipment> {
        self.repository
            .equipment
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Add flow
    pub async fn create(&self, data: CreateEquipment) -> AppResult<Equipment> {
        let data = data.normalized();
        data.validate()?;

        let now = self.clock.now_millis();
        let equipment = Equipment {
            id: Uuid::new_v4().to_string(),
            tag: data.tag,
            plant: data.plant.into(),
            equipment_type: data.equipment_type,
            status: data.status,
            comments: data.comments,
            created_at: now,
            updated_at: now,
            deleted: false,
            deletion_reason: None,
            deletion_details: None,
        };

        self.repository.equipment.add(&equipment).await?;

        match serde_json::to_value(&equipment) {
            Ok(snapshot) => self.audit.record(&equipment.id, ChangeAction::Create, snapshot).await,
            Err(e) => tracing::warn!(equipment_id = %equipment.id, "Change log payload not encoded: {}", e),
        }

        let t = self.settings.translator(None).await;
        self.notifier
            .notify(Notification::new(
                t.t("equipmentAdded"),
                format!(
                    "{} - {} ({})",
                    equipment.tag,
                    t.t(equipment.equipment_type.code()),
                    equipment.plant
                ),
            ))
            .await;

        Ok(equipment)
    }

    /// Edit flow. Returns None when the id is unknown; nothing is written then.
    pub async fn update(&self, id: &str, data: UpdateEquipment) -> AppResult<Option<Equipment>> {
        let data = data.normalized();
        data.validate()?;

        let Some(revision) = self.repository.equipment.update(id, &data).await? else {
            return Ok(None);
        };

        match serde_json::to_value(&data) {
            Ok(changes) => self.audit.record(id, change_action(&revision), changes).await,
            Err(e) => tracing::warn!(equipment_id = %id, "Change log payload not encoded: {}", e),
        }

        let current = revision.current;
        let t = self.settings.translator(None).await;
        self.notifier
            .notify(Notification::new(
                t.t("newUpdate"),
                format!("{} - {}", current.tag, t.t(current.status.code())),
            ))
            .await;

        Ok(Some(current))
    }

    /// Delete flow (soft delete). Returns None when the id is unknown.
    pub async fn delete(&self, id: &str, data: DeleteEquipment) -> AppResult<Option<Equipment>> {
        data.validate()?;
        let details = data.stored_details();

        let Some(deleted) = self
            .repository
            .equipment
            .soft_delete(id, data.reason, details.clone())
            .await?
        else {
            return Ok(None);
        };

        self.audit
            .record(
                id,
                ChangeAction::Delete,
                json!({ "deletionReason": data.reason, "deletionDetails": details }),
            )
            .await;

        Ok(Some(deleted))
    }
}

/// STATUS_CHANGE when the status is the only field whose value changed
fn change_action(revision: &EquipmentRevision) -> ChangeAction {
    let (before, after) = (&revision.previous, &revision.current);
    let only_status = before.status != after.status
        && before.tag == after.tag
        && before.plant == after.plant
        && before.equipment_type == after.equipment_type
        && before.comments == after.comments;
    if only_status {
        ChangeAction::StatusChange
    } else {
        ChangeAction::Update
    }
}
