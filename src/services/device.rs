//! Device descriptor recorded with every change log entry

use crate::{config::DeviceConfig, models::DeviceInfo};

pub trait DeviceInfoProvider: Send + Sync {
    fn device_info(&self) -> DeviceInfo;
}

/// Descriptor taken from configuration
#[derive(Debug, Clone)]
pub struct ConfiguredDevice {
    info: DeviceInfo,
}

impl ConfiguredDevice {
    pub fn new(config: &DeviceConfig) -> Self {
        let name = config.name.trim();
        let network = config.network.trim();
        Self {
            info: DeviceInfo {
                device_name: if name.is_empty() { "Unknown Device" } else { name }.to_string(),
                network_descriptor: if network.is_empty() { "Unknown" } else { network }.to_string(),
            },
        }
    }
}

impl DeviceInfoProvider for ConfiguredDevice {
    fn device_info(&self) -> DeviceInfo {
        self.info.clone()
    }
}
