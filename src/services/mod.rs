//! Business logic services

pub mod audit;
pub mod device;
pub mod equipment;
pub mod export;
pub mod i18n;
pub mod notifications;
pub mod overdue;
pub mod profile;
pub mod settings;
pub mod summary;

use std::sync::Arc;

use crate::{
    clock::Clock,
    config::AppConfig,
    repository::Repository,
};

/// External collaborators the core calls out to
#[derive(Clone)]
pub struct Collaborators {
    pub clock: Arc<dyn Clock>,
    pub device: Arc<dyn device::DeviceInfoProvider>,
    pub notifications: Arc<dyn notifications::NotificationSink>,
    pub export_sink: Arc<dyn export::ExportSink>,
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipment: equipment::EquipmentService,
    pub audit: audit::AuditLogger,
    pub summary: summary::SummaryService,
    pub overdue: overdue::OverdueMonitor,
    pub export: export::ExportService,
    pub profile: profile::ProfileService,
    pub settings: settings::SettingsService,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: Repository, config: &AppConfig, collaborators: Collaborators) -> Self {
        let Collaborators {
            clock,
            device,
            notifications,
            export_sink,
        } = collaborators;

        let notifier = notifications::Notifier::new(notifications, config.notifications.enabled);
        let settings = settings::SettingsService::new(repository.clone(), config.locale.default_language);
        let audit = audit::AuditLogger::new(repository.clone(), device, clock.clone());
        let equipment = equipment::EquipmentService::new(
            repository.clone(),
            audit.clone(),
            notifier.clone(),
            settings.clone(),
            clock.clone(),
        );

        Self {
            summary: summary::SummaryService::new(equipment.clone()),
            overdue: overdue::OverdueMonitor::new(
                equipment.clone(),
                notifier,
                settings.clone(),
                clock.clone(),
                config.monitor.overdue_days,
            ),
            export: export::ExportService::new(equipment.clone(), settings.clone(), export_sink, clock),
            profile: profile::ProfileService::new(repository),
            equipment,
            audit,
            settings,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::{
        clock::ManualClock,
        config::DeviceConfig,
        error::AppResult,
        repository::test_support::FlakyStore,
        services::{
            device::ConfiguredDevice,
            export::{DirectoryExportSink, ExportSink},
            notifications::{Notification, NotificationSink},
        },
        storage::KeyValueStore,
    };

    #[derive(Default)]
    pub struct RecordingSink {
        sent: Mutex<Vec<Notification>>,
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        async fn emit(&self, notification: &Notification) -> AppResult<()> {
            self.sent.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    pub struct Fixture {
        pub store: Arc<FlakyStore>,
        pub clock: Arc<ManualClock>,
        pub sink: Arc<RecordingSink>,
        pub services: Services,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self::with_export_sink(Arc::new(DirectoryExportSink::new(None)))
        }

        pub fn with_export_sink(export_sink: Arc<dyn ExportSink>) -> Self {
            let store = Arc::new(FlakyStore::default());
            let clock = Arc::new(ManualClock::new(1_700_000_000_000));
            let sink = Arc::new(RecordingSink::default());
            let config = AppConfig::default();

            let repository = Repository::new(store.clone(), clock.clone());
            let services = Services::new(
                repository,
                &config,
                Collaborators {
                    clock: clock.clone(),
                    device: Arc::new(ConfiguredDevice::new(&DeviceConfig {
                        name: "Test Tablet".to_string(),
                        network: "Mobile Device".to_string(),
                    })),
                    notifications: sink.clone(),
                    export_sink,
                },
            );

            Self {
                store,
                clock,
                sink,
                services,
            }
        }

        pub fn notifications(&self) -> Vec<Notification> {
            self.sink.sent.lock().unwrap().clone()
        }

        pub async fn raw(&self, key: &str) -> Option<String> {
            self.store.get(key).await.unwrap()
        }
    }
}
