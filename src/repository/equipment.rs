//! Equipment record store

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    clock::Clock,
    error::{AppError, AppResult},
    models::{DeletionReason, Equipment, UpdateEquipment},
    storage::{KeyValueStore, EQUIPMENT_KEY},
};

/// A stored element: either a decoded record or an element we could not
/// decode (e.g. a missing field or an unknown status). Undecodable elements
/// are hidden from readers and written back untouched.
enum Slot {
    Known(Equipment),
    Foreign(Value),
}

#[derive(Default)]
struct Collection {
    slots: Vec<Slot>,
}

impl Collection {
    fn records(self) -> Vec<Equipment> {
        self.slots
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Known(e) => Some(e),
                Slot::Foreign(_) => None,
            })
            .collect()
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Equipment> {
        self.slots.iter_mut().find_map(|slot| match slot {
            Slot::Known(e) if e.id == id => Some(e),
            _ => None,
        })
    }
}

/// Record state before and after an update
#[derive(Debug, Clone)]
pub struct EquipmentRevision {
    pub previous: Equipment,
    pub current: Equipment,
}

#[derive(Clone)]
pub struct EquipmentRepository {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    write_lock: Arc<Mutex<()>>,
}

impl EquipmentRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    async fn load(&self) -> AppResult<Collection> {
        let Some(raw) = self.store.get(EQUIPMENT_KEY).await? else {
            return Ok(Collection::default());
        };

        let values: Vec<Value> = serde_json::from_str(&raw).map_err(|e| {
            AppError::StorageUnavailable(format!("Equipment data is unreadable: {}", e))
        })?;

        let slots = values
            .into_iter()
            .map(|value| match Equipment::deserialize(&value) {
                Ok(equipment) => Slot::Known(equipment),
                Err(e) => {
                    let record_id = value
                        .get("id")
                        .and_then(|id| id.as_str())
                        .unwrap_or("?")
                        .to_string();
                    tracing::warn!(record = %record_id, "Skipping undecodable equipment record: {}", e);
                    Slot::Foreign(value)
                }
            })
            .collect();

        Ok(Collection { slots })
    }

    async fn save(&self, collection: &Collection) -> AppResult<()> {
        let values = collection
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Known(e) => serde_json::to_value(e),
                Slot::Foreign(v) => Ok(v.clone()),
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::StorageWriteFailed(format!("Failed to encode equipment: {}", e)))?;

        let raw = serde_json::to_string(&values)
            .map_err(|e| AppError::StorageWriteFailed(format!("Failed to encode equipment: {}", e)))?;

        self.store.set(EQUIPMENT_KEY, &raw).await?;
        Ok(())
    }

    /// List every decodable record, soft-deleted ones included, in insertion order
    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        Ok(self.load().await?.records())
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<Equipment>> {
        Ok(self.list().await?.into_iter().find(|e| e.id == id))
    }

    /// Append a record. The caller guarantees id uniqueness.
    pub async fn add(&self, equipment: &Equipment) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut collection = self.load().await?;
        collection.slots.push(Slot::Known(equipment.clone()));
        self.save(&collection).await?;
        tracing::info!(id = %equipment.id, tag = %equipment.tag, "Equipment added");
        Ok(())
    }

    /// Merge fields into the record with this id and refresh `updated_at`.
    /// Returns None, without writing anything, when the id is unknown.
    pub async fn update(&self, id: &str, data: &UpdateEquipment) -> AppResult<Option<EquipmentRevision>> {
        let _guard = self.write_lock.lock().await;
        let mut collection = self.load().await?;
        let now = self.clock.now_millis();

        let Some(record) = collection.find_mut(id) else {
            tracing::debug!(id, "Update ignored: equipment not found");
            return Ok(None);
        };
        let previous = record.clone();
        record.apply(data, now);
        let current = record.clone();

        self.save(&collection).await?;
        tracing::info!(id, "Equipment updated");
        Ok(Some(EquipmentRevision { previous, current }))
    }

    /// Mark the record deleted; it stays in storage.
    /// Returns None, without writing anything, when the id is unknown.
    pub async fn soft_delete(
        &self,
        id: &str,
        reason: DeletionReason,
        details: Option<String>,
    ) -> AppResult<Option<Equipment>> {
        let _guard = self.write_lock.lock().await;
        let mut collection = self.load().await?;
        let now = self.clock.now_millis();

        let Some(record) = collection.find_mut(id) else {
            tracing::debug!(id, "Delete ignored: equipment not found");
            return Ok(None);
        };
        record.mark_deleted(reason, details, now);
        let deleted = record.clone();

        self.save(&collection).await?;
        tracing::info!(id, reason = reason.code(), "Equipment soft-deleted");
        Ok(Some(deleted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::ManualClock,
        models::{EquipmentStatus, EquipmentType, Plant, PlantCode},
        repository::test_support::FlakyStore,
        storage::MemoryStore,
    };

    fn pump(id: &str, tag: &str) -> Equipment {
        Equipment {
            id: id.to_string(),
            tag: tag.to_string(),
            plant: Plant::Cd1.into(),
            equipment_type: EquipmentType::Pump,
            status: EquipmentStatus::Available,
            comments: String::new(),
            created_at: 1_000,
            updated_at: 1_000,
            deleted: false,
            deletion_reason: None,
            deletion_details: None,
        }
    }

    fn repo_with(store: Arc<dyn KeyValueStore>) -> (EquipmentRepository, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(10_000));
        (EquipmentRepository::new(store, clock.clone()), clock)
    }

    #[tokio::test]
    async fn test_add_preserves_insertion_order() {
        let (repo, _) = repo_with(Arc::new(MemoryStore::new()));
        repo.add(&pump("a", "P-1")).await.unwrap();
        repo.add(&pump("b", "P-2")).await.unwrap();
        repo.add(&pump("c", "P-3")).await.unwrap();

        let ids: Vec<_> = repo.list().await.unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at() {
        let (repo, clock) = repo_with(Arc::new(MemoryStore::new()));
        repo.add(&pump("a", "P-1")).await.unwrap();
        clock.set(20_000);

        let update = UpdateEquipment {
            status: Some(EquipmentStatus::InWorkshop),
            ..Default::default()
        };
        let revision = repo.update("a", &update).await.unwrap().unwrap();
        assert_eq!(revision.previous.status, EquipmentStatus::Available);
        assert_eq!(revision.current.status, EquipmentStatus::InWorkshop);

        let stored = repo.get_by_id("a").await.unwrap().unwrap();
        assert_eq!(stored.updated_at, 20_000);
        assert_eq!(stored.created_at, 1_000);
    }

    #[tokio::test]
    async fn test_update_unknown_id_leaves_blob_untouched() {
        let store = Arc::new(MemoryStore::new());
        let (repo, clock) = repo_with(store.clone());
        repo.add(&pump("a", "P-1")).await.unwrap();
        let before = store.get(EQUIPMENT_KEY).await.unwrap();

        clock.advance(1);
        let result = repo
            .update("missing", &UpdateEquipment { tag: Some("X".into()), ..Default::default() })
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(repo
            .soft_delete("missing", DeletionReason::UploadError, None)
            .await
            .unwrap()
            .is_none());

        assert_eq!(store.get(EQUIPMENT_KEY).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_soft_delete_keeps_record() {
        let (repo, clock) = repo_with(Arc::new(MemoryStore::new()));
        repo.add(&pump("a", "P-1")).await.unwrap();
        repo.add(&pump("b", "P-2")).await.unwrap();
        clock.set(50_000);

        let deleted = repo
            .soft_delete("a", DeletionReason::Other, Some("test".into()))
            .await
            .unwrap()
            .unwrap();
        assert!(deleted.deleted);
        assert_eq!(deleted.updated_at, 50_000);

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].deletion_reason, Some(DeletionReason::Other));
        assert_eq!(all[0].deletion_details.as_deref(), Some("test"));
        assert!(all[1].is_active());
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_stored_and_first_match_is_updated() {
        let (repo, _) = repo_with(Arc::new(MemoryStore::new()));
        repo.add(&pump("a", "FIRST")).await.unwrap();
        repo.add(&pump("a", "SECOND")).await.unwrap();

        repo.update("a", &UpdateEquipment { comments: Some("x".into()), ..Default::default() })
            .await
            .unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].comments, "x");
        assert_eq!(all[1].comments, "");
    }

    #[tokio::test]
    async fn test_undecodable_records_are_hidden_but_preserved() {
        let store = Arc::new(MemoryStore::new());
        let raw = r#"[
            {"id":"old","tag":"V-9","plant":"CD-1","type":"PUMP","status":"SCRAPPED","comments":"","createdAt":1,"updatedAt":1},
            {"id":"a","tag":"P-1","plant":"CD-2","type":"PUMP","status":"AVAILABLE","comments":"","createdAt":1,"updatedAt":1}
        ]"#;
        store.set(EQUIPMENT_KEY, raw).await.unwrap();
        let (repo, _) = repo_with(store.clone());

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "a");

        repo.update("a", &UpdateEquipment { tag: Some("P-1A".into()), ..Default::default() })
            .await
            .unwrap();

        let stored: Vec<Value> =
            serde_json::from_str(&store.get(EQUIPMENT_KEY).await.unwrap().unwrap()).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0]["status"], "SCRAPPED");
        assert_eq!(stored[1]["tag"], "P-1A");
    }

    #[tokio::test]
    async fn test_unknown_plant_code_stays_in_collection() {
        let store = Arc::new(MemoryStore::new());
        let raw = r#"[
            {"id":"x","tag":"V-9","plant":"ZZ-9","type":"PUMP","status":"IN WORKSHOP","comments":"","createdAt":1,"updatedAt":1}
        ]"#;
        store.set(EQUIPMENT_KEY, raw).await.unwrap();
        let (repo, _) = repo_with(store.clone());

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].plant, PlantCode::Unknown("ZZ-9".to_string()));

        repo.update("x", &UpdateEquipment { comments: Some("seal".into()), ..Default::default() })
            .await
            .unwrap()
            .unwrap();

        let stored: Vec<Value> =
            serde_json::from_str(&store.get(EQUIPMENT_KEY).await.unwrap().unwrap()).unwrap();
        assert_eq!(stored[0]["plant"], "ZZ-9");
        assert_eq!(stored[0]["comments"], "seal");
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_storage_unavailable() {
        let store = Arc::new(MemoryStore::new());
        store.set(EQUIPMENT_KEY, "not json").await.unwrap();
        let (repo, _) = repo_with(store);

        assert!(matches!(repo.list().await, Err(AppError::StorageUnavailable(_))));
        assert!(matches!(
            repo.add(&pump("a", "P-1")).await,
            Err(AppError::StorageUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_write_keeps_prior_state() {
        let store = Arc::new(FlakyStore::default());
        let (repo, _) = repo_with(store.clone());
        repo.add(&pump("a", "P-1")).await.unwrap();

        store.fail_writes(true);
        let err = repo.add(&pump("b", "P-2")).await.unwrap_err();
        assert!(matches!(err, AppError::StorageWriteFailed(_)));

        store.fail_writes(false);
        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "a");
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_not_lost() {
        let (repo, _) = repo_with(Arc::new(MemoryStore::new()));
        let mut handles = Vec::new();
        for i in 0..20 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.add(&pump(&i.to_string(), "P")).await.unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(repo.list().await.unwrap().len(), 20);
    }
}
