//! User profile blob

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::UserProfile,
    storage::{KeyValueStore, USER_KEY},
};

#[derive(Clone)]
pub struct UsersRepository {
    store: Arc<dyn KeyValueStore>,
}

impl UsersRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self) -> AppResult<Option<UserProfile>> {
        match self.store.get(USER_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| AppError::StorageUnavailable(format!("User profile is unreadable: {}", e))),
            None => Ok(None),
        }
    }

    pub async fn save(&self, profile: &UserProfile) -> AppResult<()> {
        let raw = serde_json::to_string(profile)
            .map_err(|e| AppError::StorageWriteFailed(format!("Failed to encode user profile: {}", e)))?;
        self.store.set(USER_KEY, &raw).await?;
        Ok(())
    }

    pub async fn clear(&self) -> AppResult<()> {
        self.store.remove(USER_KEY).await?;
        Ok(())
    }
}
