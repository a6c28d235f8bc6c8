//! In-memory InventoryStore
//!
//! Holds the whole inventory graph behind a single mutex so that every write
//! (a device with its nested records, a PuppetMachine history append) is
//! applied atomically with respect to readers.

use crate::error::InventoryError;
use crate::mac::MacAddress;
use crate::models::*;
use crate::store::{InventoryStore, PuppetMachineTransition, PuppetMachineUpdate};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

#[derive(Debug, Default)]
struct InventoryState {
    sites: BTreeMap<SiteId, Site>,
    devices: BTreeMap<DeviceId, NetworkDevice>,
    mac_index: HashMap<MacAddress, DeviceId>,
    hostname_index: HashMap<String, DeviceId>,
    unrecognized: Vec<UnrecognizedPxeDevice>,
    next_id: u64,
}

impl InventoryState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn check_site_unique(&self, site: &Site) -> Result<(), InventoryError> {
        for existing in self.sites.values() {
            if existing.code == site.code {
                return Err(InventoryError::Conflict(format!("site code {} already exists", site.code)));
            }
            if existing.domain == site.domain {
                return Err(InventoryError::Conflict(format!("site domain {} already exists", site.domain)));
            }
            if existing.network == site.network {
                return Err(InventoryError::Conflict(format!("site network {} already exists", site.network)));
            }
        }
        Ok(())
    }

    fn check_device_unique(&self, device: &NetworkDevice) -> Result<(), InventoryError> {
        let mut macs = Vec::new();
        for interface in &device.interfaces {
            if macs.contains(&interface.mac) || self.mac_index.contains_key(&interface.mac) {
                return Err(InventoryError::Conflict(format!("MAC address {} already exists", interface.mac)));
            }
            macs.push(interface.mac);
        }

        let mut hostnames = Vec::new();
        for hostname in device.hostnames() {
            if hostnames.contains(&hostname) || self.hostname_index.contains_key(hostname) {
                return Err(InventoryError::Conflict(format!("hostname {hostname} already exists")));
            }
            hostnames.push(hostname);
        }
        Ok(())
    }
}

/// Thread-safe in-memory inventory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<InventoryState>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Writes validate before mutating, so a poisoned lock still guards
    // consistent state.
    fn lock(&self) -> MutexGuard<'_, InventoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl InventoryStore for MemoryStore {
    async fn list_sites(&self) -> Result<Vec<Site>, InventoryError> {
        Ok(self.lock().sites.values().cloned().collect())
    }

    async fn get_site(&self, id: SiteId) -> Result<Site, InventoryError> {
        self.lock()
            .sites
            .get(&id)
            .cloned()
            .ok_or_else(|| InventoryError::NotFound(format!("Site {id} not found")))
    }

    async fn get_site_by_code(&self, code: &str) -> Result<Site, InventoryError> {
        self.lock()
            .sites
            .values()
            .find(|site| site.code == code)
            .cloned()
            .ok_or_else(|| InventoryError::NotFound(format!("Site with code {code} not found")))
    }

    async fn create_site(&self, mut site: Site) -> Result<Site, InventoryError> {
        site.validate()?;
        let mut state = self.lock();
        state.check_site_unique(&site)?;
        site.id = state.next_id();
        info!("Created site {} (id {}, network {})", site.code, site.id, site.network);
        state.sites.insert(site.id, site.clone());
        Ok(site)
    }

    async fn list_devices(&self, site_id: SiteId) -> Result<Vec<NetworkDevice>, InventoryError> {
        Ok(self
            .lock()
            .devices
            .values()
            .filter(|device| device.site_id == site_id)
            .cloned()
            .collect())
    }

    async fn get_device(&self, id: DeviceId) -> Result<NetworkDevice, InventoryError> {
        self.lock()
            .devices
            .get(&id)
            .cloned()
            .ok_or_else(|| InventoryError::NotFound(format!("NetworkDevice {id} not found")))
    }

    async fn get_device_by_mac(&self, mac: &MacAddress) -> Result<Option<NetworkDevice>, InventoryError> {
        let state = self.lock();
        Ok(state
            .mac_index
            .get(mac)
            .and_then(|id| state.devices.get(id))
            .cloned())
    }

    async fn create_device(&self, mut device: NetworkDevice) -> Result<NetworkDevice, InventoryError> {
        let mut state = self.lock();
        if !state.sites.contains_key(&device.site_id) {
            return Err(InventoryError::NotFound(format!("Site {} not found", device.site_id)));
        }
        state.check_device_unique(&device)?;

        device.id = state.next_id();
        for interface in &device.interfaces {
            state.mac_index.insert(interface.mac, device.id);
        }
        for hostname in device.hostnames() {
            state.hostname_index.insert(hostname.to_string(), device.id);
        }
        info!(
            "Created network device {} with {} interface(s) at site {}",
            device.id,
            device.interfaces.len(),
            device.site_id
        );
        state.devices.insert(device.id, device.clone());
        Ok(device)
    }

    async fn delete_device(&self, id: DeviceId) -> Result<(), InventoryError> {
        let mut state = self.lock();
        let device = state
            .devices
            .remove(&id)
            .ok_or_else(|| InventoryError::NotFound(format!("NetworkDevice {id} not found")))?;
        for interface in &device.interfaces {
            state.mac_index.remove(&interface.mac);
        }
        for hostname in device.hostnames() {
            state.hostname_index.remove(hostname);
        }
        info!("Deleted network device {id} and its owned records");
        Ok(())
    }

    async fn update_puppet_machine(
        &self,
        device_id: DeviceId,
        update: PuppetMachineUpdate,
    ) -> Result<PuppetMachineTransition, InventoryError> {
        let mut state = self.lock();
        let device = state
            .devices
            .get_mut(&device_id)
            .ok_or_else(|| InventoryError::NotFound(format!("NetworkDevice {device_id} not found")))?;
        let machine = device
            .puppet_machine
            .as_mut()
            .ok_or(InventoryError::NotPuppetManaged(device_id))?;

        // Boot state and history are not DNS data; `device.updated_at` stays put
        let previous = machine.clone();
        update(machine);
        let current = machine.clone();
        debug!("Updated PuppetMachine for device {device_id}");
        Ok(PuppetMachineTransition { previous, current })
    }

    async fn create_unrecognized_device(
        &self,
        mut device: UnrecognizedPxeDevice,
    ) -> Result<UnrecognizedPxeDevice, InventoryError> {
        let mut state = self.lock();
        device.id = state.next_id();
        info!("Recorded unrecognized PXE device {} at {}", device.mac, device.ip_address);
        state.unrecognized.push(device.clone());
        Ok(device)
    }

    async fn list_unrecognized_devices(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<UnrecognizedPxeDevice>, InventoryError> {
        let state = self.lock();
        let mut devices: Vec<UnrecognizedPxeDevice> = state
            .unrecognized
            .iter()
            .filter(|device| since.is_none_or(|since| device.created_at >= since))
            .cloned()
            .collect();
        devices.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(devices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    async fn store_with_site() -> (MemoryStore, Site) {
        let store = MemoryStore::new();
        let site = store.create_site(fixtures::site("lsc", "10.5.0.0/16")).await.unwrap();
        (store, site)
    }

    #[tokio::test]
    async fn test_create_and_lookup_device_by_mac() {
        let (store, site) = store_with_site().await;
        let device = fixtures::device(
            site.id,
            vec![fixtures::interface(
                "AA-BB-CC-DD-EE-01",
                vec![fixtures::configuration(Some("10.5.0.10"), &["web1.lsc.lco.gtn"])],
            )],
        );
        let created = store.create_device(device).await.unwrap();

        let mac: MacAddress = "aa:bb:cc:dd:ee:01".parse().unwrap();
        let found = store.get_device_by_mac(&mac).await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(store.device_count(site.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_mac_writes_nothing() {
        let (store, site) = store_with_site().await;
        let first = fixtures::device(
            site.id,
            vec![fixtures::interface("aa:bb:cc:dd:ee:01", vec![])],
        );
        store.create_device(first).await.unwrap();

        let second = fixtures::device(
            site.id,
            vec![
                fixtures::interface(
                    "aa:bb:cc:dd:ee:02",
                    vec![fixtures::configuration(Some("10.5.0.20"), &["db1.lsc.lco.gtn"])],
                ),
                fixtures::interface("aa:bb:cc:dd:ee:01", vec![]),
            ],
        );
        let err = store.create_device(second).await.unwrap_err();
        assert!(matches!(err, InventoryError::Conflict(_)));

        let mac: MacAddress = "aa:bb:cc:dd:ee:02".parse().unwrap();
        assert!(store.get_device_by_mac(&mac).await.unwrap().is_none());
        assert_eq!(store.device_count(site.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_hostname_rejected() {
        let (store, site) = store_with_site().await;
        let config = || vec![fixtures::configuration(Some("10.5.0.10"), &["web1.lsc.lco.gtn"])];
        store
            .create_device(fixtures::device(site.id, vec![fixtures::interface("aa:bb:cc:dd:ee:01", config())]))
            .await
            .unwrap();
        let err = store
            .create_device(fixtures::device(site.id, vec![fixtures::interface("aa:bb:cc:dd:ee:02", config())]))
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_indexes() {
        let (store, site) = store_with_site().await;
        let device = store
            .create_device(fixtures::device(
                site.id,
                vec![fixtures::interface(
                    "aa:bb:cc:dd:ee:01",
                    vec![fixtures::configuration(Some("10.5.0.10"), &["web1.lsc.lco.gtn"])],
                )],
            ))
            .await
            .unwrap();
        store.delete_device(device.id).await.unwrap();

        let mac: MacAddress = "aa:bb:cc:dd:ee:01".parse().unwrap();
        assert!(store.get_device_by_mac(&mac).await.unwrap().is_none());
        assert!(matches!(store.get_device(device.id).await, Err(InventoryError::NotFound(_))));

        // MAC and hostname are free again
        store
            .create_device(fixtures::device(
                site.id,
                vec![fixtures::interface(
                    "aa:bb:cc:dd:ee:01",
                    vec![fixtures::configuration(Some("10.5.0.10"), &["web1.lsc.lco.gtn"])],
                )],
            ))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_site_uniqueness() {
        let (store, _) = store_with_site().await;
        let err = store
            .create_site(fixtures::site("lsc", "10.6.0.0/16"))
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::Conflict(_)));
        let err = store
            .create_site(fixtures::site("coj", "10.5.0.0/16"))
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_puppet_machine_requires_record() {
        let (store, site) = store_with_site().await;
        let device = store
            .create_device(fixtures::device(site.id, vec![fixtures::interface("aa:bb:cc:dd:ee:01", vec![])]))
            .await
            .unwrap();
        let err = store
            .update_puppet_machine(device.id, Box::new(|machine: &mut PuppetMachine| machine.boot_mode = BootMode::Local))
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::NotPuppetManaged(id) if id == device.id));
    }

    #[tokio::test]
    async fn test_update_puppet_machine_returns_both_states() {
        let (store, site) = store_with_site().await;
        let mut device = fixtures::device(site.id, vec![fixtures::interface("aa:bb:cc:dd:ee:01", vec![])]);
        device.puppet_machine = Some(fixtures::puppet_machine("centos-7-x86_64"));
        let device = store.create_device(device).await.unwrap();

        let transition = store
            .update_puppet_machine(device.id, Box::new(|machine: &mut PuppetMachine| machine.boot_mode = BootMode::Local))
            .await
            .unwrap();
        assert_eq!(transition.previous.boot_mode, BootMode::Rebuild);
        assert_eq!(transition.current.boot_mode, BootMode::Local);
        let stored = store.get_device(device.id).await.unwrap();
        assert_eq!(stored.puppet_machine.unwrap().boot_mode, BootMode::Local);
    }

    #[tokio::test]
    async fn test_unrecognized_devices_newest_first() {
        let store = MemoryStore::new();
        let now = Utc::now();
        for (offset, last) in [(3, 1u8), (1, 2), (2, 3)] {
            store
                .create_unrecognized_device(UnrecognizedPxeDevice {
                    id: 0,
                    mac: MacAddress::new([0, 0, 0, 0, 0, last]),
                    ip_address: "10.5.0.99".parse().unwrap(),
                    data: String::new(),
                    created_at: now - chrono::Duration::hours(offset),
                })
                .await
                .unwrap();
        }
        let all = store.list_unrecognized_devices(None).await.unwrap();
        let order: Vec<u8> = all.iter().map(|device| device.mac.octets()[5]).collect();
        assert_eq!(order, vec![2, 3, 1]);

        let recent = store
            .list_unrecognized_devices(Some(now - chrono::Duration::minutes(150)))
            .await
            .unwrap();
        assert_eq!(recent.len(), 2);
    }
}
