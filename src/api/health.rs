//! Liveness and readiness checks

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{config::StorageBackend, error::AppResult};

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
    pub status: String,
    /// `redb` or `memory`
    pub storage: String,
    /// Records currently stored, deleted ones included
    pub stored_records: usize,
}

/// Process is up
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Equipment blob can be read and decoded
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Storage readable", body = ReadinessResponse),
        (status = 503, description = "Storage unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn readiness_check(State(state): State<crate::AppState>) -> AppResult<Json<ReadinessResponse>> {
    let stored = state.services.equipment.get_all().await?;
    let storage = match state.config.storage.backend {
        StorageBackend::Redb => "redb",
        StorageBackend::Memory => "memory",
    };

    Ok(Json(ReadinessResponse {
        status: "ready".to_string(),
        storage: storage.to_string(),
        stored_records: stored.len(),
    }))
}
