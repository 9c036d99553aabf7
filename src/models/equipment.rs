//! Equipment model

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::enums::{DeletionReason, EquipmentStatus, EquipmentType, Plant, PlantCode};

/// Equipment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    /// Opaque identifier, immutable after creation
    pub id: String,
    /// Short label, uppercase by convention
    pub tag: String,
    /// Plant code; codes outside the enumeration are kept as stored
    #[schema(value_type = String)]
    pub plant: PlantCode,
    #[serde(rename = "type")]
    pub equipment_type: EquipmentType,
    pub status: EquipmentStatus,
    #[serde(default)]
    pub comments: String,
    /// Milliseconds since epoch
    pub created_at: i64,
    /// Milliseconds since epoch, refreshed on every mutation
    pub updated_at: i64,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_reason: Option<DeletionReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_details: Option<String>,
}

impl Equipment {
    /// Active records are the ones visible in every view
    pub fn is_active(&self) -> bool {
        !self.deleted
    }

    /// Merge the provided fields and refresh `updated_at`
    pub fn apply(&mut self, data: &UpdateEquipment, now: i64) {
        if let Some(ref tag) = data.tag {
            self.tag = tag.clone();
        }
        if let Some(plant) = data.plant {
            self.plant = plant.into();
        }
        if let Some(equipment_type) = data.equipment_type {
            self.equipment_type = equipment_type;
        }
        if let Some(status) = data.status {
            self.status = status;
        }
        if let Some(ref comments) = data.comments {
            self.comments = comments.clone();
        }
        self.updated_at = now;
    }

    pub fn mark_deleted(&mut self, reason: DeletionReason, details: Option<String>, now: i64) {
        self.deleted = true;
        self.deletion_reason = Some(reason);
        self.deletion_details = details;
        self.updated_at = now;
    }

    /// Case-insensitive match on tag, plant, type and status codes.
    /// `query` must already be lowercase.
    pub fn matches(&self, query: &str) -> bool {
        self.tag.to_lowercase().contains(query)
            || self.plant.code().to_lowercase().contains(query)
            || self.equipment_type.code().to_lowercase().contains(query)
            || self.status.code().to_lowercase().contains(query)
    }
}

/// Create equipment request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, max = 64, message = "TAG is required (max 64 characters)"))]
    pub tag: String,
    pub plant: Plant,
    #[serde(rename = "type")]
    pub equipment_type: EquipmentType,
    #[serde(default = "default_status")]
    pub status: EquipmentStatus,
    #[serde(default)]
    pub comments: String,
}

fn default_status() -> EquipmentStatus {
    EquipmentStatus::Available
}

impl CreateEquipment {
    /// Trim free-text fields the way the entry form does
    pub fn normalized(mut self) -> Self {
        self.tag = self.tag.trim().to_string();
        self.comments = self.comments.trim().to_string();
        self
    }
}

/// Update equipment request; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 64, message = "TAG is required (max 64 characters)"))]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant: Option<Plant>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<EquipmentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EquipmentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl UpdateEquipment {
    pub fn normalized(mut self) -> Self {
        self.tag = self.tag.map(|t| t.trim().to_string());
        self.comments = self.comments.map(|c| c.trim().to_string());
        self
    }
}

/// Soft-delete request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_deletion_details"))]
pub struct DeleteEquipment {
    pub reason: DeletionReason,
    /// Required when `reason` is OTHER
    #[serde(default)]
    pub details: Option<String>,
}

impl DeleteEquipment {
    /// Details only survive for OTHER, trimmed
    pub fn stored_details(&self) -> Option<String> {
        match self.reason {
            DeletionReason::Other => self.details.as_ref().map(|d| d.trim().to_string()),
            _ => None,
        }
    }
}

fn validate_deletion_details(data: &DeleteEquipment) -> Result<(), ValidationError> {
    let has_details = data
        .details
        .as_deref()
        .map(|d| !d.trim().is_empty())
        .unwrap_or(false);
    if data.reason == DeletionReason::Other && !has_details {
        let mut err = ValidationError::new("details_required");
        err.message = Some("Please provide details when the reason is OTHER".into());
        return Err(err);
    }
    Ok(())
}

/// Equipment list filters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EquipmentQuery {
    /// Case-insensitive search over tag, plant, type and status
    pub q: Option<String>,
    /// Include soft-deleted records
    #[serde(default)]
    pub include_deleted: bool,
}
