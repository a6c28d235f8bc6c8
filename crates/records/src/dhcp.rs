//! DHCP reservation derivation
//!
//! One static reservation per interface, taken from the interface's first
//! address configuration only. Interfaces whose first configuration has no
//! address are left to the dynamic pool.

use crate::error::{RecordError, Result};
use inventory::{MacAddress, NetworkDevice};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// A static DHCP reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpRecord {
    pub macaddress: MacAddress,
    pub ipaddress: Ipv4Addr,
    pub hostname: String,
}

/// Dynamic pool for a site network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpRange {
    pub start: Ipv4Addr,
    pub end: Ipv4Addr,
}

/// Reservations for one device
pub fn device_records(device: &NetworkDevice) -> Result<Vec<DhcpRecord>> {
    let mut records = Vec::new();
    for interface in &device.interfaces {
        let Some(configuration) = interface.primary_configuration() else {
            continue;
        };
        let Some(address) = configuration.ip_address else {
            continue;
        };
        let hostname = configuration
            .primary_hostname()
            .ok_or(RecordError::MissingHostname { device: device.id, address })?;
        records.push(DhcpRecord {
            macaddress: interface.mac,
            ipaddress: address,
            hostname: hostname.to_string(),
        });
    }
    Ok(records)
}

/// Reservations for every device at a site, in device order
pub fn site_records(devices: &[NetworkDevice]) -> Result<Vec<DhcpRecord>> {
    let mut records = Vec::new();
    for device in devices {
        records.extend(device_records(device)?);
    }
    Ok(records)
}

/// Dynamic range `<a>.<b>.249.1` to `<a>.<b>.249.99` for sites inside 10/8
pub fn dynamic_range(site: &inventory::Site) -> Option<DhcpRange> {
    let [a, b, _, _] = site.network.network().octets();
    (a == 10).then(|| DhcpRange {
        start: Ipv4Addr::new(a, b, 249, 1),
        end: Ipv4Addr::new(a, b, 249, 99),
    })
}
