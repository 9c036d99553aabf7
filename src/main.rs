//! Plantrack Server - equipment inventory tracker
//!
//! Serves the local REST API and runs the overdue monitor.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plantrack::{
    api,
    clock::SystemClock,
    config::{AppConfig, StorageBackend},
    repository::Repository,
    services::{
        device::ConfiguredDevice, export::DirectoryExportSink,
        notifications::LogNotificationSink, Collaborators, Services,
    },
    storage::{KeyValueStore, MemoryStore, RedbStore},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing; the guard flushes the file writer on exit
    let _log_guard = init_tracing(&config);

    tracing::info!("Starting Plantrack Server v{}", env!("CARGO_PKG_VERSION"));

    // Open the persistence medium
    let store: Arc<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::Redb => {
            let store = RedbStore::open(Path::new(&config.storage.path))?;
            tracing::info!(path = %config.storage.path, "Opened redb store");
            Arc::new(store)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory store, data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let clock = Arc::new(SystemClock);
    let collaborators = Collaborators {
        clock: clock.clone(),
        device: Arc::new(ConfiguredDevice::new(&config.device)),
        notifications: Arc::new(LogNotificationSink),
        export_sink: Arc::new(DirectoryExportSink::new(
            config.export.directory.as_ref().map(PathBuf::from),
        )),
    };

    // Create repository and services
    let repository = Repository::new(store, clock);
    let services = Services::new(repository, &config, collaborators);

    // Overdue check at start-up, then periodically when configured
    let report = services.overdue.check().await;
    tracing::info!(overdue = report.overdue_count, "Start-up overdue check done");
    spawn_overdue_monitor(&services, config.monitor.interval_minutes);

    // Save server address before moving config
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("plantrack={},tower_http=debug", config.logging.level).into());

    let json = config.logging.format.eq_ignore_ascii_case("json");

    let (file_layer, guard) = match &config.logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "plantrack.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .with(file_layer)
        .init();

    guard
}

fn spawn_overdue_monitor(services: &Services, interval_minutes: u64) {
    if interval_minutes == 0 {
        return;
    }

    let monitor = services.overdue.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_minutes * 60));
        // The first tick completes immediately and the start-up check already ran
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let report = monitor.check().await;
            tracing::debug!(overdue = report.overdue_count, "Periodic overdue check done");
        }
    });
    tracing::info!(interval_minutes, "Overdue monitor scheduled");
}
