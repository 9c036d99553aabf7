//! API handlers for the local Plantrack endpoints

pub mod equipment;
pub mod export;
pub mod health;
pub mod openapi;
pub mod settings;
pub mod stats;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Equipment
        .route(
            "/equipment",
            get(equipment::list_equipment).post(equipment::create_equipment),
        )
        .route(
            "/equipment/:id",
            get(equipment::get_equipment)
                .put(equipment::update_equipment)
                .delete(equipment::delete_equipment),
        )
        .route("/equipment/:id/history", get(equipment::equipment_history))
        .route("/change-logs", get(equipment::list_change_logs))
        // Summary and overdue alerts
        .route("/summary", get(stats::get_summary))
        .route("/overdue/check", post(stats::check_overdue))
        // Export
        .route("/export", get(export::download_export).post(export::share_export))
        // Profile and settings
        .route(
            "/profile",
            get(settings::get_profile)
                .put(settings::save_profile)
                .delete(settings::clear_profile),
        )
        .route(
            "/settings/language",
            get(settings::get_language).put(settings::set_language),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
