//! Unrecognized PXE device intake
//!
//! PXELinux sends its environment as `_Syslinux_*` cookies when it fetches
//! the default menu. A client the inventory does not know is recorded from
//! those cookies so an operator can later promote it to a network device.

use crate::error::Result;
use chrono::{DateTime, Utc};
use inventory::{InventoryStore, MacAddress, UnrecognizedPxeDevice};
use records::dashboard::{mac_owners, unrecognized_views};
use records::UnrecognizedDeviceView;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{info, warn};

const COOKIE_PREFIX: &str = "_Syslinux_";
const BOOTIF_COOKIE: &str = "_Syslinux_BOOTIF";
const IP_COOKIE: &str = "_Syslinux_ip";

/// What a PXE client told us about itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PxeSignal {
    pub mac: MacAddress,
    pub ip_address: Ipv4Addr,
    /// Every `_Syslinux_*` cookie as `key=value` lines
    pub data: String,
}

impl PxeSignal {
    /// Signal from cookie pairs
    ///
    /// `None` when no `_Syslinux_*` cookie is present or when the MAC or
    /// client address cannot be recovered from them.
    pub fn from_cookies<'a, I>(cookies: I) -> Option<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let syslinux: Vec<(&str, &str)> = cookies
            .into_iter()
            .filter(|(key, _)| key.starts_with(COOKIE_PREFIX))
            .collect();
        if syslinux.is_empty() {
            return None;
        }
        let value = |name: &str| syslinux.iter().find(|(key, _)| *key == name).map(|(_, value)| *value);

        let Some(bootif) = value(BOOTIF_COOKIE) else {
            warn!("Ignoring PXE cookies: no {} cookie", BOOTIF_COOKIE);
            return None;
        };
        let mac = match MacAddress::from_pxe_bootif(bootif) {
            Ok(mac) => mac,
            Err(e) => {
                warn!("Ignoring PXE cookies: {}", e);
                return None;
            }
        };
        // `client:server:gateway:netmask`
        let Some(ip) = value(IP_COOKIE).and_then(|ip| urlencoding::decode(ip).ok()) else {
            warn!("Ignoring PXE cookies: missing or undecodable {} cookie", IP_COOKIE);
            return None;
        };
        let ip_address = match ip.split(':').next().unwrap_or_default().parse() {
            Ok(address) => address,
            Err(_) => {
                warn!("Ignoring PXE cookies: unparseable client address {:?}", ip);
                return None;
            }
        };

        let data = syslinux
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("\n");
        Some(Self { mac, ip_address, data })
    }

    /// Signal from an HTTP `Cookie` header value
    pub fn from_cookie_header(header: &str) -> Option<Self> {
        Self::from_cookies(
            header
                .split(';')
                .filter_map(|pair| pair.trim().split_once('=')),
        )
    }
}

#[derive(Clone)]
pub struct DeviceIntake {
    store: Arc<dyn InventoryStore>,
}

impl std::fmt::Debug for DeviceIntake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceIntake").finish_non_exhaustive()
    }
}

impl DeviceIntake {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Record a signal as a provisional device
    pub async fn record(&self, signal: PxeSignal) -> Result<UnrecognizedPxeDevice> {
        let device = self
            .store
            .create_unrecognized_device(UnrecognizedPxeDevice {
                id: 0,
                mac: signal.mac,
                ip_address: signal.ip_address,
                data: signal.data,
                created_at: Utc::now(),
            })
            .await?;
        info!("Unrecognized PXE client {} at {}", device.mac, device.ip_address);
        Ok(device)
    }

    /// Record the client behind a `Cookie` header, if it sent a usable signal
    pub async fn intake_cookie_header(&self, header: &str) -> Result<Option<UnrecognizedPxeDevice>> {
        match PxeSignal::from_cookie_header(header) {
            Some(signal) => Ok(Some(self.record(signal).await?)),
            None => Ok(None),
        }
    }

    /// Unrecognized devices newest first, with resolved site and known owner
    pub async fn views(&self, since: Option<DateTime<Utc>>) -> Result<Vec<UnrecognizedDeviceView>> {
        let unrecognized = self.store.list_unrecognized_devices(since).await?;
        let sites = self.store.list_sites().await?;
        let index = inventory::SiteIndex::new(&sites);
        let mut devices = Vec::new();
        for site in &sites {
            devices.extend(self.store.list_devices(site.id).await?);
        }
        Ok(unrecognized_views(&unrecognized, &index, &mac_owners(&devices)))
    }
}
