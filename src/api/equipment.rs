//! Equipment API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{ChangeLog, CreateEquipment, DeleteEquipment, Equipment, EquipmentQuery, UpdateEquipment},
};

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Equipment {} not found", id))
}

/// List equipment
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    params(EquipmentQuery),
    responses(
        (status = 200, description = "Equipment list", body = Vec<Equipment>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    Query(query): Query<EquipmentQuery>,
) -> Json<Vec<Equipment>> {
    Json(state.services.equipment.list(&query).await)
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Unknown equipment", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.get_by_id(&id).await?;
    Ok(Json(equipment))
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    let equipment = state.services.equipment.create(data).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update equipment
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 404, description = "Unknown equipment", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(data): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    state
        .services
        .equipment
        .update(&id, data)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// Soft-delete equipment
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    request_body = DeleteEquipment,
    responses(
        (status = 200, description = "Equipment marked deleted", body = Equipment),
        (status = 400, description = "Missing deletion details", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown equipment", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(data): Json<DeleteEquipment>,
) -> AppResult<Json<Equipment>> {
    state
        .services
        .equipment
        .delete(&id, data)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// Change history of one equipment record
#[utoipa::path(
    get,
    path = "/equipment/{id}/history",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Change log entries, oldest first", body = Vec<ChangeLog>)
    )
)]
pub async fn equipment_history(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<ChangeLog>>> {
    Ok(Json(state.services.audit.history(&id).await?))
}

/// Full change log
#[utoipa::path(
    get,
    path = "/change-logs",
    tag = "equipment",
    responses(
        (status = 200, description = "All change log entries, oldest first", body = Vec<ChangeLog>)
    )
)]
pub async fn list_change_logs(State(state): State<crate::AppState>) -> AppResult<Json<Vec<ChangeLog>>> {
    Ok(Json(state.services.audit.list().await?))
}
