//! Boot configuration errors

use inventory::{DeviceId, InventoryError, MacAddress};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PxeError {
    /// No boot configuration rules exist for this operating system
    #[error("Unsupported operating system: {0}")]
    UnsupportedOperatingSystem(String),

    /// The device has no hostname to boot under
    #[error("NetworkDevice(pk={0}) has no hostname")]
    MissingHostname(DeviceId),

    /// The requested MAC address does not belong to the device
    #[error("NetworkDevice(pk={device}) has no interface {mac}")]
    UnknownInterface { device: DeviceId, mac: MacAddress },

    #[error("Password hashing error: {0}")]
    Credentials(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, PxeError>;
