//! Aggregation engine: per-plant status counts over active equipment

use std::collections::HashMap;

use crate::{
    models::{Equipment, Plant, StatusSummary},
    services::equipment::EquipmentService,
};

/// Count active records per plant and status.
///
/// One bucket per plant of the fixed enumeration; plants with no active
/// record are left out, as are records whose plant code is not in the
/// enumeration. Output follows the enumeration order.
pub fn summarize(equipment: &[Equipment]) -> Vec<StatusSummary> {
    let mut buckets: HashMap<Plant, StatusSummary> = Plant::ALL
        .iter()
        .map(|plant| (*plant, StatusSummary::empty(*plant)))
        .collect();

    for record in equipment.iter().filter(|e| e.is_active()) {
        match record.plant.known().and_then(|plant| buckets.get_mut(&plant)) {
            Some(bucket) => bucket.record(record.status),
            None => tracing::warn!(
                equipment_id = %record.id,
                plant = %record.plant,
                "Plant outside the enumeration, left out of the summary"
            ),
        }
    }

    Plant::ALL
        .iter()
        .filter_map(|plant| buckets.remove(plant))
        .filter(|summary| summary.total > 0)
        .collect()
}

#[derive(Clone)]
pub struct SummaryService {
    equipment: EquipmentService,
}

impl SummaryService {
    pub fn new(equipment: EquipmentService) -> Self {
        Self { equipment }
    }

    /// Summaries computed fresh from the current collection
    pub async fn get_summaries(&self) -> Vec<StatusSummary> {
        summarize(&self.equipment.active_or_empty().await)
    }
}
