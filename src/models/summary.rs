//! Per-plant status summary (derived, never stored)

use serde::Serialize;
use utoipa::ToSchema;

use super::enums::{EquipmentStatus, Plant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub plant: Plant,
    pub available: u32,
    pub in_operation: u32,
    pub not_available: u32,
    pub in_workshop: u32,
    pub total: u32,
}

impl StatusSummary {
    pub fn empty(plant: Plant) -> Self {
        Self {
            plant,
            available: 0,
            in_operation: 0,
            not_available: 0,
            in_workshop: 0,
            total: 0,
        }
    }

    pub fn record(&mut self, status: EquipmentStatus) {
        match status {
            EquipmentStatus::Available => self.available += 1,
            EquipmentStatus::InOperation => self.in_operation += 1,
            EquipmentStatus::NotAvailable => self.not_available += 1,
            EquipmentStatus::InWorkshop => self.in_workshop += 1,
        }
        self.total += 1;
    }
}
