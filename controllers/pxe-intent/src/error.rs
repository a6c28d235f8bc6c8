//! Controller-specific error types.
//!
//! Wraps the errors of every crate the controller drives and classifies
//! each one the way a boot-time HTTP endpoint reports it.

use inventory::InventoryError;
use provisioning::ProvisioningError;
use pxe_config::PxeError;
use records::RecordError;
use thiserror::Error;

/// Errors that can occur in the PXE Intent Controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Inventory lookup or write failed
    #[error("{0}")]
    Inventory(#[from] InventoryError),

    /// DNS/DHCP derivation failed
    #[error("{0}")]
    Records(#[from] RecordError),

    /// Boot configuration could not be derived
    #[error("{0}")]
    Pxe(#[from] PxeError),

    #[error("{0}")]
    Provisioning(#[from] ProvisioningError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Inventory snapshot could not be read or written
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ControllerError {
    /// HTTP status an API front end would answer with
    ///
    /// Unsupported operating systems and configuration faults are server
    /// errors; missing records are not found; bad input and data-integrity
    /// faults in the request's subject are bad requests.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Inventory(e)
            | Self::Pxe(PxeError::Inventory(e))
            | Self::Records(RecordError::Inventory(e))
            | Self::Provisioning(ProvisioningError::Inventory(e)) => inventory_status(e),
            Self::Pxe(PxeError::MissingHostname(_) | PxeError::UnknownInterface { .. }) => 400,
            Self::Records(RecordError::MissingHostname { .. }) => 400,
            Self::Provisioning(
                ProvisioningError::InvalidParameter(_) | ProvisioningError::NoDiagnosticTarget(_),
            ) => 400,
            Self::Provisioning(ProvisioningError::Records(RecordError::MissingHostname { .. })) => 400,
            Self::Provisioning(ProvisioningError::Records(RecordError::Inventory(e))) => inventory_status(e),
            Self::Pxe(_) | Self::InvalidConfig(_) | Self::Snapshot(_) | Self::Io(_) | Self::Serialization(_) => 500,
        }
    }
}

fn inventory_status(error: &InventoryError) -> u16 {
    match error {
        InventoryError::NotFound(_) | InventoryError::NotPuppetManaged(_) => 404,
        InventoryError::Conflict(_)
        | InventoryError::InvalidMacAddress(_)
        | InventoryError::InvalidOperatingSystem(_)
        | InventoryError::InvalidBootMode(_)
        | InventoryError::InvalidPartitionScheme(_)
        | InventoryError::InvalidNetwork(_)
        | InventoryError::InvalidRequest(_) => 400,
        InventoryError::Http(_) | InventoryError::Api(_) | InventoryError::Serialization(_) => 502,
    }
}
