//! Profile and settings endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{Language, UserProfile},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LanguageSetting {
    pub language: Language,
}

/// Get the stored profile
#[utoipa::path(
    get,
    path = "/profile",
    tag = "settings",
    responses(
        (status = 200, description = "Profile, or null when signed out", body = Option<UserProfile>)
    )
)]
pub async fn get_profile(State(state): State<crate::AppState>) -> Json<Option<UserProfile>> {
    Json(state.services.profile.get().await)
}

/// Replace the stored profile
#[utoipa::path(
    put,
    path = "/profile",
    tag = "settings",
    request_body = UserProfile,
    responses(
        (status = 200, description = "Profile saved", body = UserProfile)
    )
)]
pub async fn save_profile(
    State(state): State<crate::AppState>,
    Json(profile): Json<UserProfile>,
) -> AppResult<Json<UserProfile>> {
    Ok(Json(state.services.profile.save(profile).await?))
}

/// Sign out: remove the stored profile
#[utoipa::path(
    delete,
    path = "/profile",
    tag = "settings",
    responses(
        (status = 204, description = "Profile removed")
    )
)]
pub async fn clear_profile(State(state): State<crate::AppState>) -> AppResult<StatusCode> {
    state.services.profile.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the display language
#[utoipa::path(
    get,
    path = "/settings/language",
    tag = "settings",
    responses(
        (status = 200, description = "Current language", body = LanguageSetting)
    )
)]
pub async fn get_language(State(state): State<crate::AppState>) -> Json<LanguageSetting> {
    Json(LanguageSetting {
        language: state.services.settings.language().await,
    })
}

/// Change the display language
#[utoipa::path(
    put,
    path = "/settings/language",
    tag = "settings",
    request_body = LanguageSetting,
    responses(
        (status = 200, description = "Language saved", body = LanguageSetting)
    )
)]
pub async fn set_language(
    State(state): State<crate::AppState>,
    Json(setting): Json<LanguageSetting>,
) -> AppResult<Json<LanguageSetting>> {
    let language = state.services.settings.set_language(setting.language).await?;
    Ok(Json(LanguageSetting { language }))
}
