//! Persisted preferences

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::Language,
    storage::{KeyValueStore, LANGUAGE_KEY},
};

#[derive(Clone)]
pub struct SettingsRepository {
    store: Arc<dyn KeyValueStore>,
}

impl SettingsRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored language, None when unset or unrecognised
    pub async fn language(&self) -> AppResult<Option<Language>> {
        let Some(raw) = self.store.get(LANGUAGE_KEY).await? else {
            return Ok(None);
        };
        match raw.parse::<Language>() {
            Ok(lang) => Ok(Some(lang)),
            Err(e) => {
                tracing::warn!("Ignoring stored language: {}", e);
                Ok(None)
            }
        }
    }

    /// Stored as the bare language code (`en`, `es`)
    pub async fn set_language(&self, language: Language) -> AppResult<()> {
        self.store.set(LANGUAGE_KEY, language.code()).await?;
        Ok(())
    }
}
