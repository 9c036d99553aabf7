//! Local user profile

use crate::{error::AppResult, models::UserProfile, repository::Repository};

#[derive(Clone)]
pub struct ProfileService {
    repository: Repository,
}

impl ProfileService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Current profile; an unreadable blob reads as signed out
    pub async fn get(&self) -> Option<UserProfile> {
        match self.repository.users.get().await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::error!("Failed to read user profile: {}", e);
                None
            }
        }
    }

    pub async fn save(&self, profile: UserProfile) -> AppResult<UserProfile> {
        self.repository.users.save(&profile).await?;
        Ok(profile)
    }

    pub async fn clear(&self) -> AppResult<()> {
        self.repository.users.clear().await?;
        tracing::info!("User profile cleared");
        Ok(())
    }
}
