//! Export serializer and sharing channel
//!
//! Layout of the exported text, per plant in lexicographic order of the
//! plant code:
//!
//! ```text
//!
//! CD-1
//! TAG,Type,Status,Comments,Created,Updated
//! "P-101","Pump","Available","","3/5/2024","3/5/2024"
//!
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    clock::Clock,
    error::{AppError, AppResult},
    models::{Equipment, Language},
    services::{equipment::EquipmentService, i18n::Translator, settings::SettingsService},
};

pub const CSV_HEADER: &str = "TAG,Type,Status,Comments,Created,Updated";
pub const CSV_MIME: &str = "text/csv";

/// Quote a field, doubling embedded quotes
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Render the active records, grouped by plant
pub fn render_csv(equipment: &[Equipment], t: &Translator) -> String {
    let mut groups: BTreeMap<&str, Vec<&Equipment>> = BTreeMap::new();
    for record in equipment.iter().filter(|e| e.is_active()) {
        groups.entry(record.plant.code()).or_default().push(record);
    }

    let mut out = String::new();
    for (plant, records) in groups {
        out.push('\n');
        out.push_str(plant);
        out.push('\n');
        out.push_str(CSV_HEADER);
        out.push('\n');

        for record in records {
            let row = [
                quote(&record.tag),
                quote(t.t(record.equipment_type.code())),
                quote(t.t(record.status.code())),
                quote(&record.comments),
                quote(&t.date(record.created_at)),
                quote(&t.date(record.updated_at)),
            ];
            out.push_str(&row.join(","));
            out.push('\n');
        }

        out.push('\n');
    }
    out
}

/// `equipment_export_<YYYY-MM-DD>.csv` for the given instant (UTC)
pub fn export_file_name(now_millis: i64) -> String {
    let date = DateTime::from_timestamp_millis(now_millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown-date".to_string());
    format!("equipment_export_{}.csv", date)
}

/// Sharing channel for exported files
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExportSink: Send + Sync {
    /// False when the platform has no way to share or store the file
    fn is_available(&self) -> bool;

    /// Hand over the file; returns where it ended up
    async fn deliver(&self, file_name: &str, content: &str) -> AppResult<String>;
}

/// Writes exports into a directory. Without a directory there is no channel.
#[derive(Debug, Clone)]
pub struct DirectoryExportSink {
    directory: Option<PathBuf>,
}

impl DirectoryExportSink {
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl ExportSink for DirectoryExportSink {
    fn is_available(&self) -> bool {
        self.directory.is_some()
    }

    async fn deliver(&self, file_name: &str, content: &str) -> AppResult<String> {
        let directory = self
            .directory
            .as_ref()
            .ok_or_else(|| AppError::ExportUnavailable("Sharing is not available on this device".to_string()))?;

        tokio::fs::create_dir_all(directory)
            .await
            .map_err(|e| AppError::ExportUnavailable(format!("Cannot create export directory: {}", e)))?;

        let path = directory.join(file_name);
        tokio::fs::write(&path, content.as_bytes())
            .await
            .map_err(|e| AppError::ExportUnavailable(format!("Cannot write export file: {}", e)))?;

        Ok(path.display().to_string())
    }
}

/// Rendered export, not yet delivered
#[derive(Debug, Clone)]
pub struct ExportDocument {
    pub file_name: String,
    pub content: String,
    pub row_count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub file_name: String,
    pub location: String,
    pub row_count: usize,
    pub mime_type: String,
}

#[derive(Clone)]
pub struct ExportService {
    equipment: EquipmentService,
    settings: SettingsService,
    sink: Arc<dyn ExportSink>,
    clock: Arc<dyn Clock>,
}

impl ExportService {
    pub fn new(
        equipment: EquipmentService,
        settings: SettingsService,
        sink: Arc<dyn ExportSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            equipment,
            settings,
            sink,
            clock,
        }
    }

    /// Render a fresh snapshot in the given (or current) language
    pub async fn render(&self, language: Option<Language>) -> AppResult<ExportDocument> {
        let equipment = self.equipment.get_all().await?;
        let t = self.settings.translator(language).await;

        Ok(ExportDocument {
            file_name: export_file_name(self.clock.now_millis()),
            row_count: equipment.iter().filter(|e| e.is_active()).count(),
            content: render_csv(&equipment, &t),
        })
    }

    /// Render and hand the file to the sharing channel
    pub async fn export(&self, language: Option<Language>) -> AppResult<ExportReport> {
        if !self.sink.is_available() {
            return Err(AppError::ExportUnavailable(
                "Sharing is not available on this device".to_string(),
            ));
        }

        let document = self.render(language).await?;
        let location = self.sink.deliver(&document.file_name, &document.content).await?;
        tracing::info!(file = %document.file_name, rows = document.row_count, %location, "Equipment exported");

        Ok(ExportReport {
            file_name: document.file_name,
            location,
            row_count: document.row_count,
            mime_type: CSV_MIME.to_string(),
        })
    }
}
