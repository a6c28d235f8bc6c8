//! Record derivation errors

use inventory::{DeviceId, InventoryError};
use std::net::Ipv4Addr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    /// An addressed configuration with no hostname has no name to publish
    #[error("NetworkDevice(pk={device}) configuration {address} has no hostname")]
    MissingHostname { device: DeviceId, address: Ipv4Addr },

    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),
}

pub type Result<T> = std::result::Result<T, RecordError>;
