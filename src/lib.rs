//! Plantrack
//!
//! Offline-first inventory tracker for industrial equipment across a fixed set
//! of plants. Records live in a local key/value store; every mutation leaves an
//! audit entry, and a local REST JSON API exposes listing, summaries, overdue
//! alerts and CSV export.

use std::sync::Arc;

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod storage;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
