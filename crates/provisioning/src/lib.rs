//! Provisioning
//!
//! Tracks where each Puppet-managed machine is in its install lifecycle and
//! takes in PXE clients the inventory does not know yet:
//! - [`ProvisioningTracker`]: boot-mode state machine with boot and build history
//! - [`DeviceIntake`]: `_Syslinux_*` cookies to unrecognized device records
//! - [`diagnostics`]: validated parameters and commands for reachability checks

pub mod diagnostics;
pub mod error;
pub mod intake;
pub mod origin;
pub mod tracker;

pub use error::ProvisioningError;
pub use intake::{DeviceIntake, PxeSignal};
pub use origin::RequestOrigin;
pub use tracker::{BootModeChange, ProvisioningHistory, ProvisioningTracker};
