//! Configuration management for Plantrack

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::models::Language;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// redb file on disk
    Redb,
    /// Process memory, lost on exit
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Database file for the redb backend
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// When set, logs also go to a daily rolling file in this directory
    pub directory: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LocaleConfig {
    /// Used until a language is chosen and stored
    pub default_language: Language,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MonitorConfig {
    /// Days a record may stay NOT AVAILABLE / IN WORKSHOP before it is overdue
    pub overdue_days: u32,
    /// Period of the background overdue check; 0 runs it only at start-up
    pub interval_minutes: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ExportConfig {
    /// Target directory for exported files; no directory means no sharing channel
    pub directory: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DeviceConfig {
    pub name: String,
    pub network: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NotificationsConfig {
    pub enabled: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub locale: LocaleConfig,
    pub monitor: MonitorConfig,
    pub export: ExportConfig,
    pub device: DeviceConfig,
    pub notifications: NotificationsConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix PLANTRACK_, e.g. PLANTRACK_SERVER__PORT)
            .add_source(
                Environment::with_prefix("PLANTRACK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override the database file from PLANTRACK_DB if present
            .set_override_option("storage.path", env::var("PLANTRACK_DB").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Redb,
            path: "data/plantrack.redb".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            directory: None,
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default_language: Language::En,
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            overdue_days: 30,
            interval_minutes: 0,
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: "Unknown Device".to_string(),
            network: "Mobile Device".to_string(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
