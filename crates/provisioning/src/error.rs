//! Provisioning errors

use inventory::{DeviceId, InventoryError};
use records::RecordError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisioningError {
    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),

    #[error("Record error: {0}")]
    Records(#[from] RecordError),

    /// A query parameter could not be parsed
    #[error("{0}")]
    InvalidParameter(String),

    /// The device has neither a static address nor a hostname to reach it by
    #[error("NetworkDevice(pk={0}) has no address or hostname to check")]
    NoDiagnosticTarget(DeviceId),
}

pub type Result<T> = std::result::Result<T, ProvisioningError>;
