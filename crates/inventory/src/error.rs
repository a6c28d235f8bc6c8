//! Inventory errors

use crate::models::DeviceId;
use thiserror::Error;

/// Errors that can occur when reading or writing the inventory graph
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// The device exists but has no PuppetMachine record
    #[error("NetworkDevice(pk={0}) is not Puppet managed")]
    NotPuppetManaged(DeviceId),

    /// A uniqueness constraint would be violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// MAC address could not be parsed
    #[error("Invalid MAC address: {0}")]
    InvalidMacAddress(String),

    /// Operating system identity could not be parsed
    #[error("Invalid operating system: {0}")]
    InvalidOperatingSystem(String),

    /// Boot mode value is not one of the known states
    #[error("The boot mode value \"{0}\" is not supported (choose from: local,rebuild,rebuildalt,rescue)")]
    InvalidBootMode(String),

    /// Partition scheme value is not one of the known schemes
    #[error("Invalid partition scheme: {0}")]
    InvalidPartitionScheme(String),

    /// Site network is not a valid IPv4 network
    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    /// Invalid request (e.g., missing required fields)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP request/response error talking to PuppetDB
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// PuppetDB returned an error
    #[error("PuppetDB API error: {0}")]
    Api(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;
