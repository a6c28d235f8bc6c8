//! Inventory snapshot files.
//!
//! The inventory is exchanged as one YAML (or JSON) document: sites with the
//! devices they own, plus unrecognized PXE clients. Identifiers are assigned
//! when the snapshot is loaded into a store.

use crate::error::ControllerError;
use inventory::{InventoryStore, MemoryStore, NetworkDevice, Site, UnrecognizedPxeDevice};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventorySnapshot {
    #[serde(default)]
    pub sites: Vec<SiteSnapshot>,
    #[serde(default)]
    pub unrecognized: Vec<UnrecognizedPxeDevice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSnapshot {
    #[serde(flatten)]
    pub site: Site,
    #[serde(default)]
    pub devices: Vec<NetworkDevice>,
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|extension| extension.eq_ignore_ascii_case("json"))
}

impl InventorySnapshot {
    pub fn load(path: &Path) -> Result<Self, ControllerError> {
        let contents = std::fs::read_to_string(path)?;
        let snapshot = if is_json(path) {
            serde_json::from_str(&contents)?
        } else {
            serde_yaml::from_str(&contents)
                .map_err(|e| ControllerError::Snapshot(format!("{}: {e}", path.display())))?
        };
        Ok(snapshot)
    }

    pub fn save(&self, path: &Path) -> Result<(), ControllerError> {
        let contents = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self).map_err(|e| ControllerError::Snapshot(format!("{}: {e}", path.display())))?
        };
        std::fs::write(path, contents)?;
        debug!("Wrote inventory snapshot {}", path.display());
        Ok(())
    }

    /// Load every site, device and unrecognized client into a fresh store
    pub async fn into_store(self) -> Result<MemoryStore, ControllerError> {
        let store = MemoryStore::new();
        let mut device_count = 0;
        for SiteSnapshot { site, devices } in self.sites {
            let site = store.create_site(site).await?;
            for mut device in devices {
                device.site_id = site.id;
                store.create_device(device).await?;
                device_count += 1;
            }
        }
        for device in self.unrecognized {
            store.create_unrecognized_device(device).await?;
        }
        info!("Loaded inventory snapshot with {} device(s)", device_count);
        Ok(store)
    }

    /// Snapshot of everything in `store`
    pub async fn from_store(store: &dyn InventoryStore) -> Result<Self, ControllerError> {
        let mut sites = Vec::new();
        for site in store.list_sites().await? {
            let devices = store.list_devices(site.id).await?;
            sites.push(SiteSnapshot { site, devices });
        }
        let mut unrecognized = store.list_unrecognized_devices(None).await?;
        unrecognized.reverse();
        Ok(Self { sites, unrecognized })
    }
}
