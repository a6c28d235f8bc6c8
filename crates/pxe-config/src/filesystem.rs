//! Partition filesystem types per release

use crate::error::Result;
use crate::platform::{CentosRelease, Platform};
use inventory::OperatingSystem;
use serde::Serialize;

/// Filesystem for `/boot`, `/` and every other partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilesystemTypes {
    /// Readable by the bootloader
    pub bootable: &'static str,
    /// Readable by the initrd
    pub root: &'static str,
    /// Mounted once the full userspace is running
    pub other: &'static str,
}

impl FilesystemTypes {
    pub const fn for_release(release: CentosRelease) -> Self {
        match release {
            CentosRelease::V5 => Self { bootable: "ext3", root: "ext3", other: "ext3" },
            CentosRelease::V6 => Self { bootable: "ext4", root: "ext4", other: "xfs" },
            CentosRelease::V7 | CentosRelease::V8 => Self { bootable: "xfs", root: "xfs", other: "xfs" },
        }
    }
}

/// Filesystem types for an operating system; fatal for anything without
/// Kickstart partitioning rules
pub fn filesystem_types(os: &OperatingSystem) -> Result<FilesystemTypes> {
    let release = Platform::resolve(os)?.centos_release()?;
    Ok(FilesystemTypes::for_release(release))
}
