//! Data models for Plantrack

pub mod change_log;
pub mod enums;
pub mod equipment;
pub mod summary;
pub mod user;

// Re-export commonly used types
pub use change_log::{ChangeLog, DeviceInfo};
pub use enums::{ChangeAction, DeletionReason, EquipmentStatus, EquipmentType, Language, Plant, PlantCode};
pub use equipment::{CreateEquipment, DeleteEquipment, Equipment, EquipmentQuery, UpdateEquipment};
pub use summary::StatusSummary;
pub use user::UserProfile;
