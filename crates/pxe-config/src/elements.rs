//! Template elements
//!
//! The values a PXELinux or Kickstart template renders, tagged by `ostype`
//! so a single document can be fed to the template for that OS family.

use crate::filesystem::FilesystemTypes;
use inventory::{Arch, BootMode, DeviceId, MacAddress, PartitionScheme, Site};
use serde::Serialize;

/// Sent by PXELinux clients that do not report their MAC address
pub const MAC_NOT_SENT: &str = "not-sent-by-pxelinux";

/// URLs the installer calls back to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootUrls {
    base_url: String,
}

impl BootUrls {
    /// An empty base yields host-relative URLs
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base(&self) -> String {
        format!("{}/", self.base_url)
    }

    pub fn tftp(&self, mac: &MacAddress) -> String {
        format!("{}/tftp/{mac}", self.base_url)
    }

    pub fn tftp_unknown(&self) -> String {
        format!("{}/tftp/{MAC_NOT_SENT}", self.base_url)
    }

    pub fn kickstart(&self, mac: &MacAddress) -> String {
        format!("{}/ks/{mac}", self.base_url)
    }

    pub fn bootmode(&self, device: DeviceId) -> String {
        format!("{}/api/networkdevice/{device}/bootmode/", self.base_url)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CentosTftpConfig {
    pub site: Site,
    pub osversion: u32,
    pub arch: Arch,
    pub hostname: String,
    pub mirrorbase: String,
    pub network_configuration: String,
    pub extra: String,
    pub tftpurl: String,
    pub ksurl: String,
    pub boot_mode: BootMode,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProxmoxTftpConfig {
    pub site: Site,
    pub arch: Arch,
    pub hostname: String,
    pub mirrorbase: String,
    pub tftpurl: String,
    pub ksurl: String,
    pub boot_mode: BootMode,
    /// Display form, `6.1`
    pub pveversion: String,
}

/// PXELinux boot configuration elements
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "ostype", rename_all = "lowercase")]
pub enum TftpConfig {
    Centos(CentosTftpConfig),
    Proxmox(ProxmoxTftpConfig),
}

impl TftpConfig {
    pub fn boot_mode(&self) -> BootMode {
        match self {
            Self::Centos(config) => config.boot_mode,
            Self::Proxmox(config) => config.boot_mode,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CentosKickstartConfig {
    pub site: Site,
    pub osversion: u32,
    pub arch: Arch,
    pub hostname: String,
    pub partition: PartitionScheme,
    pub partition_custom: String,
    pub mirrorbase: String,
    pub crypt_password_root: String,
    pub crypt_password_eng: String,
    pub network_configuration: String,
    pub bootmodeurl: String,
    pub boot_mode: BootMode,
    pub fstype_bootable: &'static str,
    pub fstype_root: &'static str,
    pub fstype_other: &'static str,
}

impl CentosKickstartConfig {
    pub fn filesystem_types(&self) -> FilesystemTypes {
        FilesystemTypes {
            bootable: self.fstype_bootable,
            root: self.fstype_root,
            other: self.fstype_other,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProxmoxKickstartConfig {
    pub site: Site,
    pub arch: Arch,
    pub mirrorbase: String,
    pub boot_mode: BootMode,
    pub pveversion: String,
}

/// Anaconda Kickstart elements
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "ostype", rename_all = "lowercase")]
pub enum KickstartConfig {
    Centos(CentosKickstartConfig),
    Proxmox(ProxmoxKickstartConfig),
}

/// PXELinux menu served to clients the inventory does not know
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultMenu {
    pub mac: String,
    pub tftpurl: String,
    pub baseurl: String,
}
