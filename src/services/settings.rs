//! Settings service: the selected display language

use crate::{
    error::AppResult,
    models::Language,
    repository::Repository,
    services::i18n::Translator,
};

#[derive(Clone)]
pub struct SettingsService {
    repository: Repository,
    default_language: Language,
}

impl SettingsService {
    pub fn new(repository: Repository, default_language: Language) -> Self {
        Self {
            repository,
            default_language,
        }
    }

    /// Stored language, or the configured default. An unreadable medium
    /// falls back to the default.
    pub async fn language(&self) -> Language {
        match self.repository.settings.language().await {
            Ok(Some(lang)) => lang,
            Ok(None) => self.default_language,
            Err(e) => {
                tracing::error!("Failed to read language preference: {}", e);
                self.default_language
            }
        }
    }

    pub async fn set_language(&self, language: Language) -> AppResult<Language> {
        self.repository.settings.set_language(language).await?;
        tracing::info!(language = language.code(), "Language changed");
        Ok(language)
    }

    /// Translator for an explicit language, or for the current one
    pub async fn translator(&self, language: Option<Language>) -> Translator {
        match language {
            Some(lang) => Translator::new(lang),
            None => Translator::new(self.language().await),
        }
    }
}
