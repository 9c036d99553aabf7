//! Repository layer over the key-value persistence medium
//!
//! Each collection is one JSON blob under a stable key. Mutations are
//! read-modify-write over the whole blob, serialized per blob by an
//! in-process writer lock.

pub mod change_logs;
pub mod equipment;
pub mod settings;
pub mod users;

use std::sync::Arc;

use crate::{clock::Clock, storage::KeyValueStore};

/// Main repository struct holding the persistence medium
#[derive(Clone)]
pub struct Repository {
    pub store: Arc<dyn KeyValueStore>,
    pub equipment: equipment::EquipmentRepository,
    pub change_logs: change_logs::ChangeLogRepository,
    pub users: users::UsersRepository,
    pub settings: settings::SettingsRepository,
}

impl Repository {
    /// Create a new repository over the given store
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(store.clone(), clock),
            change_logs: change_logs::ChangeLogRepository::new(store.clone()),
            users: users::UsersRepository::new(store.clone()),
            settings: settings::SettingsRepository::new(store.clone()),
            store,
        }
    }
}
