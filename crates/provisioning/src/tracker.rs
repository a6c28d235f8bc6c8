//! Provisioning state tracker
//!
//! Owns the boot-mode state machine of every PuppetMachine and the history
//! it leaves behind:
//! - a TFTP request logs the boot mode the machine is booting in
//! - a Kickstart request in a rebuild mode opens a build (`BEGIN`)
//! - setting `local` after a rebuild mode closes it (`COMPLETE`)
//!
//! Every decision is made inside [`InventoryStore::update_puppet_machine`],
//! so it always sees the boot mode it is about to change. Internal requests
//! only read.

use crate::error::Result;
use crate::origin::RequestOrigin;
use chrono::{DateTime, Utc};
use inventory::{
    BootHistory, BootMode, BuildHistory, BuildStatus, DeviceId, InventoryStore, PuppetMachine,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of an operator setting the boot mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BootModeChange {
    pub device_id: DeviceId,
    pub previous: BootMode,
    pub current: BootMode,
    /// Build event appended by this change, if any
    pub build_status: Option<BuildStatus>,
}

/// Boot and build history of one machine, newest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvisioningHistory {
    pub device_id: DeviceId,
    pub boot_mode: BootMode,
    pub last_boot_at: Option<DateTime<Utc>>,
    pub last_build_at: Option<DateTime<Utc>>,
    pub boot_history: Vec<BootHistory>,
    pub build_history: Vec<BuildHistory>,
}

impl From<(DeviceId, &PuppetMachine)> for ProvisioningHistory {
    fn from((device_id, machine): (DeviceId, &PuppetMachine)) -> Self {
        Self {
            device_id,
            boot_mode: machine.boot_mode,
            last_boot_at: machine.last_boot_at(),
            last_build_at: machine.last_build_at(),
            boot_history: machine.boot_history_newest_first().copied().collect(),
            build_history: machine.build_history_newest_first().copied().collect(),
        }
    }
}

#[derive(Clone)]
pub struct ProvisioningTracker {
    store: Arc<dyn InventoryStore>,
}

impl std::fmt::Debug for ProvisioningTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProvisioningTracker").finish_non_exhaustive()
    }
}

impl ProvisioningTracker {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Current boot mode
    pub async fn boot_mode(&self, device_id: DeviceId) -> Result<BootMode> {
        let device = self.store.get_device(device_id).await?;
        Ok(device.puppet_machine()?.boot_mode)
    }

    pub async fn history(&self, device_id: DeviceId) -> Result<ProvisioningHistory> {
        let device = self.store.get_device(device_id).await?;
        Ok(ProvisioningHistory::from((device_id, device.puppet_machine()?)))
    }

    /// A machine fetched its PXELinux configuration; returns the boot mode
    /// it was served
    pub async fn record_tftp_request(&self, device_id: DeviceId, origin: RequestOrigin) -> Result<BootMode> {
        if origin.is_internal() {
            return self.boot_mode(device_id).await;
        }
        let now = Utc::now();
        let transition = self
            .store
            .update_puppet_machine(
                device_id,
                Box::new(move |machine: &mut PuppetMachine| {
                    machine.boot_history.push(BootHistory {
                        created_at: now,
                        boot_mode: machine.boot_mode,
                    });
                }),
            )
            .await?;
        debug!("Logged {} boot for device {device_id}", transition.current.boot_mode);
        Ok(transition.current.boot_mode)
    }

    /// A machine fetched its Kickstart file; returns the build event appended,
    /// if any
    pub async fn record_kickstart_request(
        &self,
        device_id: DeviceId,
        origin: RequestOrigin,
    ) -> Result<Option<BuildStatus>> {
        if origin.is_internal() {
            self.boot_mode(device_id).await?;
            return Ok(None);
        }
        let now = Utc::now();
        let transition = self
            .store
            .update_puppet_machine(
                device_id,
                Box::new(move |machine: &mut PuppetMachine| {
                    if machine.boot_mode.is_rebuild() {
                        machine.build_history.push(BuildHistory {
                            created_at: now,
                            status: BuildStatus::Begin,
                        });
                    }
                }),
            )
            .await?;
        let status = appended_build_status(&transition.previous, &transition.current);
        if status.is_some() {
            info!("Build started for device {device_id} ({})", transition.current.boot_mode);
        }
        Ok(status)
    }

    /// Operator action: set the boot mode from its string form
    pub async fn set_boot_mode(
        &self,
        device_id: DeviceId,
        action: &str,
        origin: RequestOrigin,
    ) -> Result<BootModeChange> {
        let mode: BootMode = action.parse()?;
        let now = Utc::now();
        let transition = self
            .store
            .update_puppet_machine(
                device_id,
                Box::new(move |machine: &mut PuppetMachine| {
                    let previous = machine.boot_mode;
                    machine.boot_mode = mode;
                    if !origin.is_internal() && previous.is_rebuild() && mode == BootMode::Local {
                        machine.build_history.push(BuildHistory {
                            created_at: now,
                            status: BuildStatus::Complete,
                        });
                    }
                }),
            )
            .await?;

        let change = BootModeChange {
            device_id,
            previous: transition.previous.boot_mode,
            current: transition.current.boot_mode,
            build_status: appended_build_status(&transition.previous, &transition.current),
        };
        info!(
            "Boot mode for device {device_id} set {} -> {} ({:?})",
            change.previous, change.current, origin
        );
        Ok(change)
    }
}

fn appended_build_status(previous: &PuppetMachine, current: &PuppetMachine) -> Option<BuildStatus> {
    if current.build_history.len() > previous.build_history.len() {
        current.build_history.last().map(|entry| entry.status)
    } else {
        None
    }
}
