//! PXE boot configuration
//!
//! Derives the elements of PXELinux (TFTP) boot configurations and Anaconda
//! Kickstart files for Puppet-managed machines:
//! - Kernel command line network configuration and installer flags
//! - Kickstart network directive, partition filesystems and hashed passwords
//! - Package mirror selection
//! - A default menu for clients the inventory does not know
//!
//! Every rule dispatches on the machine's operating system family and
//! release. An unsupported release is an error, never a fallback.

pub mod config;
pub mod credentials;
pub mod elements;
pub mod engine;
pub mod error;
pub mod filesystem;
pub mod kickstart;
pub mod mirror;
pub mod platform;
pub mod tftp;

pub use config::PxeConfig;
pub use elements::{BootUrls, DefaultMenu, KickstartConfig, TftpConfig};
pub use engine::BootConfigEngine;
pub use error::PxeError;
pub use filesystem::{filesystem_types, FilesystemTypes};
pub use platform::{CentosRelease, Platform, ProxmoxRelease};
