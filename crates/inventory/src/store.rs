//! InventoryStore trait
//!
//! Abstracts the persistence of the inventory graph so the derivation and
//! provisioning crates can run against the in-memory store in tests and in
//! the controller. All async methods must be `Send` to work with Tokio's
//! work-stealing runtime.

use crate::error::InventoryError;
use crate::mac::MacAddress;
use crate::models::*;
use crate::site_index::SiteIndex;
use chrono::{DateTime, Utc};

/// Closure applied to a PuppetMachine under the store's write lock
pub type PuppetMachineUpdate = Box<dyn FnOnce(&mut PuppetMachine) + Send>;

/// Previous and updated PuppetMachine from one atomic update
#[derive(Debug, Clone, PartialEq)]
pub struct PuppetMachineTransition {
    pub previous: PuppetMachine,
    pub current: PuppetMachine,
}

/// Trait for inventory graph operations
#[async_trait::async_trait]
pub trait InventoryStore: Send + Sync {
    // Sites
    async fn list_sites(&self) -> Result<Vec<Site>, InventoryError>;
    async fn get_site(&self, id: SiteId) -> Result<Site, InventoryError>;
    async fn get_site_by_code(&self, code: &str) -> Result<Site, InventoryError>;
    /// Validate and insert a site; the id in `site` is ignored and assigned
    async fn create_site(&self, site: Site) -> Result<Site, InventoryError>;

    // Devices
    async fn list_devices(&self, site_id: SiteId) -> Result<Vec<NetworkDevice>, InventoryError>;
    async fn get_device(&self, id: DeviceId) -> Result<NetworkDevice, InventoryError>;
    async fn get_device_by_mac(&self, mac: &MacAddress) -> Result<Option<NetworkDevice>, InventoryError>;
    /// Insert a device with all of its interfaces, configurations, hostnames,
    /// Puppet and Webcam records. Nothing is written unless every uniqueness
    /// check passes.
    async fn create_device(&self, device: NetworkDevice) -> Result<NetworkDevice, InventoryError>;
    /// Remove a device and everything it owns
    async fn delete_device(&self, id: DeviceId) -> Result<(), InventoryError>;

    /// Read-modify-write of a device's PuppetMachine, serialized per store
    ///
    /// The closure observes the current state and its changes become visible
    /// atomically, so history appends can never be decided on stale state.
    async fn update_puppet_machine(
        &self,
        device_id: DeviceId,
        update: PuppetMachineUpdate,
    ) -> Result<PuppetMachineTransition, InventoryError>;

    // Unrecognized PXE devices
    async fn create_unrecognized_device(
        &self,
        device: UnrecognizedPxeDevice,
    ) -> Result<UnrecognizedPxeDevice, InventoryError>;
    /// Unrecognized devices, newest first, optionally only those created at
    /// or after `since`
    async fn list_unrecognized_devices(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<UnrecognizedPxeDevice>, InventoryError>;

    /// Number of devices owned by a site
    async fn device_count(&self, site_id: SiteId) -> Result<usize, InventoryError> {
        Ok(self.list_devices(site_id).await?.len())
    }

    /// Longest-prefix index over every site's internal network
    async fn site_index(&self) -> Result<SiteIndex, InventoryError> {
        Ok(SiteIndex::new(&self.list_sites().await?))
    }
}
