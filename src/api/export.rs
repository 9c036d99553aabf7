//! Export endpoints

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::Language,
    services::export::{ExportReport, CSV_MIME},
};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ExportQuery {
    /// Label language (`en`, `es`); defaults to the selected one
    #[param(value_type = Option<String>)]
    pub lang: Option<Language>,
}

/// Download the export as CSV
#[utoipa::path(
    get,
    path = "/export",
    tag = "export",
    params(ExportQuery),
    responses(
        (status = 200, description = "CSV export of active equipment", content_type = "text/csv", body = String)
    )
)]
pub async fn download_export(
    State(state): State<crate::AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    let document = state.services.export.render(query.lang).await?;
    let disposition = format!("attachment; filename=\"{}\"", document.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, format!("{}; charset=utf-8", CSV_MIME)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.content,
    ))
}

/// Export to the sharing channel
#[utoipa::path(
    post,
    path = "/export",
    tag = "export",
    params(ExportQuery),
    responses(
        (status = 200, description = "File handed to the sharing channel", body = ExportReport),
        (status = 503, description = "No sharing channel", body = crate::error::ErrorResponse)
    )
)]
pub async fn share_export(
    State(state): State<crate::AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Json<ExportReport>> {
    Ok(Json(state.services.export.export(query.lang).await?))
}
