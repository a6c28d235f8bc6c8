//! Operating system dispatch
//!
//! Every boot configuration rule is a match over [`Platform`]. Resolving an
//! [`OperatingSystem`] into a platform is the only place an unsupported
//! `(ostype, osversion)` pair is detected.

use crate::error::{PxeError, Result};
use inventory::{Arch, OperatingSystem, OsType};
use std::fmt;

/// Supported CentOS major releases
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CentosRelease {
    V5,
    V6,
    V7,
    V8,
}

impl CentosRelease {
    pub fn from_major(major: u32) -> Option<Self> {
        match major {
            5 => Some(Self::V5),
            6 => Some(Self::V6),
            7 => Some(Self::V7),
            8 => Some(Self::V8),
            _ => None,
        }
    }

    pub fn major(&self) -> u32 {
        match self {
            Self::V5 => 5,
            Self::V6 => 6,
            Self::V7 => 7,
            Self::V8 => 8,
        }
    }
}

/// Proxmox VE release, stored as its digits (`61` is 6.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProxmoxRelease(u32);

impl ProxmoxRelease {
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProxmoxRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let (major, minor) = digits.split_at(1);
        if minor.is_empty() {
            f.write_str(major)
        } else {
            write!(f, "{major}.{minor}")
        }
    }
}

/// A bootable operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Centos { release: CentosRelease, arch: Arch },
    Proxmox { release: ProxmoxRelease, arch: Arch },
}

impl Platform {
    pub fn resolve(os: &OperatingSystem) -> Result<Self> {
        match os.os_type {
            OsType::Centos => CentosRelease::from_major(os.version)
                .map(|release| Self::Centos { release, arch: os.arch })
                .ok_or_else(|| {
                    PxeError::UnsupportedOperatingSystem(format!("Unknown CentOS Major Version: {}", os.version))
                }),
            OsType::Proxmox => Ok(Self::Proxmox {
                release: ProxmoxRelease(os.version),
                arch: os.arch,
            }),
        }
    }

    /// The CentOS release, for rules that only exist for Kickstart installs
    pub fn centos_release(&self) -> Result<CentosRelease> {
        match self {
            Self::Centos { release, .. } => Ok(*release),
            Self::Proxmox { release, .. } => Err(PxeError::UnsupportedOperatingSystem(format!(
                "Proxmox VE {release} has no Kickstart installer rules"
            ))),
        }
    }

    pub fn arch(&self) -> Arch {
        match self {
            Self::Centos { arch, .. } | Self::Proxmox { arch, .. } => *arch,
        }
    }
}
