//! Closed domain enumerations
//!
//! Serialized forms are the display codes used by the on-device data
//! (`"IN OPERATION"`, `"HEAT EXCHANGER"`, ...). Underscore spellings are
//! accepted on read.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Plant
// ---------------------------------------------------------------------------

/// Operational site / unit, the grouping key for summaries and exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Plant {
    #[serde(rename = "CD-1", alias = "CD_1")]
    Cd1,
    #[serde(rename = "CD-2", alias = "CD_2")]
    Cd2,
    #[serde(rename = "CD-3", alias = "CD_3")]
    Cd3,
    #[serde(rename = "CD-4", alias = "CD_4")]
    Cd4,
    #[serde(rename = "AV-2", alias = "AV_2")]
    Av2,
    #[serde(rename = "AV-3", alias = "AV_3")]
    Av3,
    #[serde(rename = "PG-1", alias = "PG_1")]
    Pg1,
    #[serde(rename = "SER")]
    Ser,
    #[serde(rename = "DESAL")]
    Desal,
    #[serde(rename = "BC-4", alias = "BC_4")]
    Bc4,
    #[serde(rename = "BC-5", alias = "BC_5")]
    Bc5,
    #[serde(rename = "OTHER")]
    Other,
}

impl Plant {
    pub const ALL: [Plant; 12] = [
        Plant::Cd1,
        Plant::Cd2,
        Plant::Cd3,
        Plant::Cd4,
        Plant::Av2,
        Plant::Av3,
        Plant::Pg1,
        Plant::Ser,
        Plant::Desal,
        Plant::Bc4,
        Plant::Bc5,
        Plant::Other,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Plant::Cd1 => "CD-1",
            Plant::Cd2 => "CD-2",
            Plant::Cd3 => "CD-3",
            Plant::Cd4 => "CD-4",
            Plant::Av2 => "AV-2",
            Plant::Av3 => "AV-3",
            Plant::Pg1 => "PG-1",
            Plant::Ser => "SER",
            Plant::Desal => "DESAL",
            Plant::Bc4 => "BC-4",
            Plant::Bc5 => "BC-5",
            Plant::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for Plant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Plant of a stored record. Codes outside the enumeration (older data,
/// other app versions) are kept verbatim and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlantCode {
    Known(Plant),
    Unknown(String),
}

impl PlantCode {
    pub fn code(&self) -> &str {
        match self {
            PlantCode::Known(plant) => plant.code(),
            PlantCode::Unknown(raw) => raw,
        }
    }

    pub fn known(&self) -> Option<Plant> {
        match self {
            PlantCode::Known(plant) => Some(*plant),
            PlantCode::Unknown(_) => None,
        }
    }
}

impl From<Plant> for PlantCode {
    fn from(plant: Plant) -> Self {
        PlantCode::Known(plant)
    }
}

impl std::fmt::Display for PlantCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// EquipmentType
// ---------------------------------------------------------------------------

/// Equipment category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum EquipmentType {
    #[serde(rename = "PUMP")]
    Pump,
    #[serde(rename = "MOTOR")]
    Motor,
    #[serde(rename = "FAN")]
    Fan,
    #[serde(rename = "FAN COOLER", alias = "FAN_COOLER")]
    FanCooler,
    #[serde(rename = "BLOWER")]
    Blower,
    #[serde(rename = "FURNACE")]
    Furnace,
    #[serde(rename = "HEAT EXCHANGER", alias = "HEAT_EXCHANGER")]
    HeatExchanger,
    #[serde(rename = "CONTROL VALVE", alias = "CONTROL_VALVE")]
    ControlValve,
    #[serde(rename = "INSTRUMENT")]
    Instrument,
    #[serde(rename = "DRUM")]
    Drum,
    #[serde(rename = "TOWER")]
    Tower,
    #[serde(rename = "TANK")]
    Tank,
}

impl EquipmentType {
    pub const ALL: [EquipmentType; 12] = [
        EquipmentType::Pump,
        EquipmentType::Motor,
        EquipmentType::Fan,
        EquipmentType::FanCooler,
        EquipmentType::Blower,
        EquipmentType::Furnace,
        EquipmentType::HeatExchanger,
        EquipmentType::ControlValve,
        EquipmentType::Instrument,
        EquipmentType::Drum,
        EquipmentType::Tower,
        EquipmentType::Tank,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            EquipmentType::Pump => "PUMP",
            EquipmentType::Motor => "MOTOR",
            EquipmentType::Fan => "FAN",
            EquipmentType::FanCooler => "FAN COOLER",
            EquipmentType::Blower => "BLOWER",
            EquipmentType::Furnace => "FURNACE",
            EquipmentType::HeatExchanger => "HEAT EXCHANGER",
            EquipmentType::ControlValve => "CONTROL VALVE",
            EquipmentType::Instrument => "INSTRUMENT",
            EquipmentType::Drum => "DRUM",
            EquipmentType::Tower => "TOWER",
            EquipmentType::Tank => "TANK",
        }
    }
}

impl std::fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

/// Operational status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum EquipmentStatus {
    #[serde(rename = "AVAILABLE")]
    Available,
    #[serde(rename = "IN OPERATION", alias = "IN_OPERATION")]
    InOperation,
    #[serde(rename = "NOT AVAILABLE", alias = "NOT_AVAILABLE")]
    NotAvailable,
    #[serde(rename = "IN WORKSHOP", alias = "IN_WORKSHOP")]
    InWorkshop,
}

impl EquipmentStatus {
    pub const ALL: [EquipmentStatus; 4] = [
        EquipmentStatus::Available,
        EquipmentStatus::InOperation,
        EquipmentStatus::NotAvailable,
        EquipmentStatus::InWorkshop,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            EquipmentStatus::Available => "AVAILABLE",
            EquipmentStatus::InOperation => "IN OPERATION",
            EquipmentStatus::NotAvailable => "NOT AVAILABLE",
            EquipmentStatus::InWorkshop => "IN WORKSHOP",
        }
    }

    /// Statuses watched by the overdue monitor
    pub fn is_critical(&self) -> bool {
        matches!(self, EquipmentStatus::NotAvailable | EquipmentStatus::InWorkshop)
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// DeletionReason
// ---------------------------------------------------------------------------

/// Why a record was soft-deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DeletionReason {
    #[serde(rename = "UPLOAD ERROR", alias = "UPLOAD_ERROR")]
    UploadError,
    #[serde(rename = "DEVICE DISASSEMBLED", alias = "DEVICE_DISASSEMBLED")]
    DeviceDisassembled,
    #[serde(rename = "OTHER")]
    Other,
}

impl DeletionReason {
    pub fn code(&self) -> &'static str {
        match self {
            DeletionReason::UploadError => "UPLOAD ERROR",
            DeletionReason::DeviceDisassembled => "DEVICE DISASSEMBLED",
            DeletionReason::Other => "OTHER",
        }
    }
}

// ---------------------------------------------------------------------------
// ChangeAction
// ---------------------------------------------------------------------------

/// Kind of mutation recorded in the change log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeAction {
    Create,
    Update,
    Delete,
    StatusChange,
}

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Display language for labels, notifications and export dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "es" | "spanish" | "español" => Ok(Language::Es),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Language::En => "English",
            Language::Es => "Español",
        };
        write!(f, "{}", label)
    }
}
