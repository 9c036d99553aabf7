//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{equipment, export, health, settings, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Plantrack API",
        version = "1.0.0",
        description = "Local API of the Plantrack equipment tracker"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        equipment::equipment_history,
        equipment::list_change_logs,
        // Stats
        stats::get_summary,
        stats::check_overdue,
        // Export
        export::download_export,
        export::share_export,
        // Settings
        settings::get_profile,
        settings::save_profile,
        settings::clear_profile,
        settings::get_language,
        settings::set_language,
    ),
    components(
        schemas(
            // Equipment
            crate::models::Equipment,
            crate::models::CreateEquipment,
            crate::models::UpdateEquipment,
            crate::models::DeleteEquipment,
            crate::models::Plant,
            crate::models::EquipmentType,
            crate::models::EquipmentStatus,
            crate::models::DeletionReason,
            // Change log
            crate::models::ChangeLog,
            crate::models::ChangeAction,
            crate::models::DeviceInfo,
            // Stats
            crate::models::StatusSummary,
            crate::services::overdue::OverdueReport,
            // Export
            crate::services::export::ExportReport,
            // Settings
            crate::models::UserProfile,
            crate::models::Language,
            settings::LanguageSetting,
            // Health
            health::HealthResponse,
            health::ReadinessResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Equipment records and change history"),
        (name = "stats", description = "Status summaries and overdue alerts"),
        (name = "export", description = "CSV export"),
        (name = "settings", description = "Profile and language")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
