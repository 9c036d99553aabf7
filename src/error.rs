//! Error types for Plantrack

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::storage::StorageError;

/// Numeric error codes returned in API error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    StorageUnavailable = 2,
    StorageWriteFailed = 3,
    BadValue = 4,
    NoSuchEquipment = 5,
    ExportUnavailable = 6,
    NotificationFailure = 7,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// The persistence medium could not be read
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The persistence medium rejected a write; prior state is untouched
    #[error("Storage write failed: {0}")]
    StorageWriteFailed(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// No sharing channel or write target for an export
    #[error("Export unavailable: {0}")]
    ExportUnavailable(String),

    /// Never propagated past the notifier
    #[error("Notification delivery failed: {0}")]
    NotificationDeliveryFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Read(msg) => AppError::StorageUnavailable(msg),
            StorageError::Write(msg) => AppError::StorageWriteFailed(msg),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::StorageUnavailable(msg) => {
                tracing::error!("Storage unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorCode::StorageUnavailable,
                    "Storage unavailable".to_string(),
                )
            }
            AppError::StorageWriteFailed(msg) => {
                tracing::error!("Storage write failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::StorageWriteFailed,
                    "Failed to save changes".to_string(),
                )
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::ExportUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, ErrorCode::ExportUnavailable, msg.clone())
            }
            AppError::NotificationDeliveryFailed(msg) => {
                tracing::error!("Notification error reached the API: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::NotificationFailure,
                    "Notification delivery failed".to_string(),
                )
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchEquipment, msg.clone())
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
