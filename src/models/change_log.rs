//! Change log (audit trail) model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::ChangeAction;

/// Device provenance captured at the time of a mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub device_name: String,
    /// Network descriptor; stored under the historical `ipAddress` key
    #[serde(rename = "ipAddress")]
    pub network_descriptor: String,
}

/// Append-only audit record. Never mutated or removed once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLog {
    pub id: String,
    /// Referenced equipment; the record may later be soft-deleted
    pub equipment_id: String,
    pub action: ChangeAction,
    /// Milliseconds since epoch
    pub timestamp: i64,
    /// Full snapshot for CREATE, partial fields for UPDATE/STATUS_CHANGE,
    /// reason and details for DELETE
    #[schema(value_type = Object)]
    pub changes: serde_json::Value,
    pub device_info: DeviceInfo,
}
