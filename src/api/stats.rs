//! Status summary and overdue check endpoints

use axum::{extract::State, Json};

use crate::{models::StatusSummary, services::overdue::OverdueReport};

/// Per-plant status summary of active equipment
#[utoipa::path(
    get,
    path = "/summary",
    tag = "stats",
    responses(
        (status = 200, description = "One entry per plant with active equipment", body = Vec<StatusSummary>)
    )
)]
pub async fn get_summary(State(state): State<crate::AppState>) -> Json<Vec<StatusSummary>> {
    Json(state.services.summary.get_summaries().await)
}

/// Run the overdue check now
#[utoipa::path(
    post,
    path = "/overdue/check",
    tag = "stats",
    responses(
        (status = 200, description = "Overdue equipment found by this run", body = OverdueReport)
    )
)]
pub async fn check_overdue(State(state): State<crate::AppState>) -> Json<OverdueReport> {
    Json(state.services.overdue.check().await)
}
