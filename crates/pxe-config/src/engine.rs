//! Boot configuration engine
//!
//! Turns a Puppet-managed network device into the elements of its PXELinux
//! boot configuration and Kickstart file. Rendering the elements into text is
//! left to the templates.

use crate::config::PxeConfig;
use crate::credentials::{CryptPasswords, HashScheme, SitePasswords};
use crate::elements::*;
use crate::error::{PxeError, Result};
use crate::filesystem::FilesystemTypes;
use crate::mirror::MirrorPolicy;
use crate::platform::Platform;
use crate::{kickstart, tftp};
use inventory::{MacAddress, NetworkDevice, Site};
use tracing::{debug, info};

pub struct BootConfigEngine {
    config: PxeConfig,
    mirrors: MirrorPolicy,
    urls: BootUrls,
}

impl BootConfigEngine {
    pub fn new(config: PxeConfig, urls: BootUrls) -> Result<Self> {
        let mirrors = MirrorPolicy::new(&config.mirror)?;
        Ok(Self { config, mirrors, urls })
    }

    pub fn config(&self) -> &PxeConfig {
        &self.config
    }

    pub fn urls(&self) -> &BootUrls {
        &self.urls
    }

    /// PXELinux configuration for the device booting from `mac`
    pub fn tftp_config(&self, site: &Site, device: &NetworkDevice, mac: &MacAddress) -> Result<TftpConfig> {
        let machine = device.puppet_machine()?;
        let hostname = Self::hostname(device, mac)?;
        let platform = Platform::resolve(&machine.operating_system)?;
        let mirrorbase = self
            .mirrors
            .select(site, Some(hostname), machine.boot_mode)
            .to_string();
        info!(
            "TFTP configuration for {} ({}) boot_mode={} mirror={}",
            hostname, mac, machine.boot_mode, mirrorbase
        );

        let config = match platform {
            Platform::Centos { release, arch } => TftpConfig::Centos(CentosTftpConfig {
                site: site.clone(),
                osversion: release.major(),
                arch,
                hostname: hostname.to_string(),
                mirrorbase,
                network_configuration: tftp::network_configuration(release, site, device, mac)?,
                extra: tftp::extra_flags(release, device, &self.config.legacy_text_mode_prefix),
                tftpurl: self.urls.tftp(mac),
                ksurl: self.urls.kickstart(mac),
                boot_mode: machine.boot_mode,
            }),
            Platform::Proxmox { release, arch } => TftpConfig::Proxmox(ProxmoxTftpConfig {
                site: site.clone(),
                arch,
                hostname: hostname.to_string(),
                mirrorbase,
                tftpurl: self.urls.tftp(mac),
                ksurl: self.urls.kickstart(mac),
                boot_mode: machine.boot_mode,
                pveversion: release.to_string(),
            }),
        };
        Ok(config)
    }

    /// Kickstart elements for the device booting from `mac`
    ///
    /// Password hashes are salted afresh on every call.
    pub fn kickstart_config(
        &self,
        site: &Site,
        device: &NetworkDevice,
        mac: &MacAddress,
    ) -> Result<KickstartConfig> {
        let machine = device.puppet_machine()?;
        let hostname = Self::hostname(device, mac)?;
        let platform = Platform::resolve(&machine.operating_system)?;
        let mirrorbase = self
            .mirrors
            .select(site, Some(hostname), machine.boot_mode)
            .to_string();
        info!(
            "Kickstart configuration for {} ({}) os={} boot_mode={}",
            hostname, mac, machine.operating_system, machine.boot_mode
        );

        let config = match platform {
            Platform::Centos { release, arch } => {
                let passwords = SitePasswords::for_site(&site.code, &self.config.credentials);
                let scheme = HashScheme::for_release(release);
                debug!("Hashing site passwords with {:?}", scheme);
                let crypt = CryptPasswords::hash(&passwords, scheme)?;
                let filesystems = FilesystemTypes::for_release(release);

                KickstartConfig::Centos(CentosKickstartConfig {
                    site: site.clone(),
                    osversion: release.major(),
                    arch,
                    hostname: hostname.to_string(),
                    partition: machine.partition_scheme,
                    partition_custom: machine.partition_scheme_custom.clone(),
                    mirrorbase,
                    crypt_password_root: crypt.root,
                    crypt_password_eng: crypt.eng,
                    network_configuration: kickstart::network_configuration(release, site, device, mac)?,
                    bootmodeurl: self.urls.bootmode(device.id),
                    boot_mode: machine.boot_mode,
                    fstype_bootable: filesystems.bootable,
                    fstype_root: filesystems.root,
                    fstype_other: filesystems.other,
                })
            }
            Platform::Proxmox { release, arch } => KickstartConfig::Proxmox(ProxmoxKickstartConfig {
                site: site.clone(),
                arch,
                mirrorbase,
                boot_mode: machine.boot_mode,
                pveversion: release.to_string(),
            }),
        };
        Ok(config)
    }

    /// Menu for a client the inventory does not know
    pub fn default_menu(&self, mac: Option<&MacAddress>) -> DefaultMenu {
        match mac {
            Some(mac) => DefaultMenu {
                mac: mac.to_string(),
                tftpurl: self.urls.tftp(mac),
                baseurl: self.urls.base(),
            },
            None => DefaultMenu {
                mac: MAC_NOT_SENT.to_string(),
                tftpurl: self.urls.tftp_unknown(),
                baseurl: self.urls.base(),
            },
        }
    }

    /// The interface must belong to the device and the device must have a
    /// hostname to install under
    fn hostname<'a>(device: &'a NetworkDevice, mac: &MacAddress) -> Result<&'a str> {
        if device.find_interface(mac).is_none() {
            return Err(PxeError::UnknownInterface { device: device.id, mac: *mac });
        }
        device.primary_hostname().ok_or(PxeError::MissingHostname(device.id))
    }
}
