//! Overdue monitor
//!
//! A record is overdue when it is active, NOT AVAILABLE or IN WORKSHOP, and
//! was last updated more than the threshold ago. Each run that finds at least
//! one overdue record emits one aggregate notification; repeated runs alert
//! again for the same records.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::{
    clock::{Clock, MILLIS_PER_DAY},
    models::Equipment,
    services::{
        equipment::EquipmentService,
        notifications::{Notification, Notifier},
        settings::SettingsService,
    },
};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverdueReport {
    pub overdue_count: usize,
    pub equipment_ids: Vec<String>,
    /// Whether an alert was handed to the notifier
    pub notified: bool,
}

/// Overdue records among `equipment` at time `now`
pub fn find_overdue(equipment: &[Equipment], now: i64, threshold_days: u32) -> Vec<&Equipment> {
    let cutoff = now - i64::from(threshold_days) * MILLIS_PER_DAY;
    equipment
        .iter()
        .filter(|e| e.is_active() && e.status.is_critical() && e.updated_at < cutoff)
        .collect()
}

#[derive(Clone)]
pub struct OverdueMonitor {
    equipment: EquipmentService,
    notifier: Notifier,
    settings: SettingsService,
    clock: Arc<dyn Clock>,
    threshold_days: u32,
}

impl OverdueMonitor {
    pub fn new(
        equipment: EquipmentService,
        notifier: Notifier,
        settings: SettingsService,
        clock: Arc<dyn Clock>,
        threshold_days: u32,
    ) -> Self {
        Self {
            equipment,
            notifier,
            settings,
            clock,
            threshold_days,
        }
    }

    pub fn threshold_days(&self) -> u32 {
        self.threshold_days
    }

    /// Scan the whole collection and alert when anything is overdue
    pub async fn check(&self) -> OverdueReport {
        let equipment = self.equipment.get_all_or_empty().await;
        let overdue = find_overdue(&equipment, self.clock.now_millis(), self.threshold_days);
        let count = overdue.len();

        let report = OverdueReport {
            overdue_count: count,
            equipment_ids: overdue.iter().map(|e| e.id.clone()).collect(),
            notified: count > 0,
        };

        if count == 0 {
            tracing::debug!("Overdue check: nothing overdue");
            return report;
        }

        tracing::info!(count, threshold_days = self.threshold_days, "Overdue equipment found");
        let t = self.settings.translator(None).await;
        self.notifier
            .notify(
                Notification::new(t.t("alertTitle"), t.overdue_message(count, self.threshold_days))
                    .with_data(json!({ "overdueCount": count })),
            )
            .await;

        report
    }
}
