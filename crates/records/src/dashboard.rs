//! Per-site dashboard aggregates and unrecognized-device views

use chrono::{DateTime, Duration, Utc};
use inventory::{
    BootMode, DeviceId, MacAddress, NetworkDevice, Site, SiteId, SiteIndex, UnrecognizedPxeDevice,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::Ipv4Addr;

/// Trailing window covered by the dashboard
pub const DASHBOARD_WINDOW_HOURS: i64 = 24;

/// Activity at one site over the trailing window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardData {
    pub unrecognized_device_count: usize,
    pub boot_mode_local_count: usize,
    pub boot_mode_rebuild_count: usize,
    pub boot_mode_rebuildalt_count: usize,
    pub boot_mode_rescue_count: usize,
}

impl DashboardData {
    fn count_boot(&mut self, mode: BootMode) {
        let counter = match mode {
            BootMode::Local => &mut self.boot_mode_local_count,
            BootMode::Rebuild => &mut self.boot_mode_rebuild_count,
            BootMode::RebuildAlt => &mut self.boot_mode_rebuildalt_count,
            BootMode::Rescue => &mut self.boot_mode_rescue_count,
        };
        *counter += 1;
    }
}

/// Dashboard for `site`
///
/// `devices` are the devices owned by the site. Unrecognized devices are
/// attributed to the site their address resolves to through `index`.
pub fn dashboard(
    site: &Site,
    index: &SiteIndex,
    devices: &[NetworkDevice],
    unrecognized: &[UnrecognizedPxeDevice],
    now: DateTime<Utc>,
) -> DashboardData {
    let cutoff = now - Duration::hours(DASHBOARD_WINDOW_HOURS);
    let mut data = DashboardData {
        unrecognized_device_count: unrecognized
            .iter()
            .filter(|device| device.created_at >= cutoff)
            .filter(|device| index.lookup(device.ip_address) == Some(site.id))
            .count(),
        ..DashboardData::default()
    };

    let boots = devices
        .iter()
        .filter(|device| device.site_id == site.id)
        .filter_map(|device| device.puppet_machine.as_ref())
        .flat_map(|machine| &machine.boot_history)
        .filter(|entry| entry.created_at >= cutoff);
    for entry in boots {
        data.count_boot(entry.boot_mode);
    }
    data
}

/// An unrecognized device with its computed relations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnrecognizedDeviceView {
    pub id: u64,
    pub mac: MacAddress,
    pub ip_address: Ipv4Addr,
    pub data: String,
    pub created_at: DateTime<Utc>,
    /// Site whose network most specifically contains `ip_address`
    pub site_id: Option<SiteId>,
    /// Whether the MAC already belongs to an inventory interface
    pub found: bool,
    pub network_device_id: Option<DeviceId>,
}

/// Interface MAC → owning device, across every site
pub fn mac_owners(devices: &[NetworkDevice]) -> HashMap<MacAddress, DeviceId> {
    devices
        .iter()
        .flat_map(|device| device.interfaces.iter().map(move |interface| (interface.mac, device.id)))
        .collect()
}

pub fn unrecognized_views(
    unrecognized: &[UnrecognizedPxeDevice],
    index: &SiteIndex,
    owners: &HashMap<MacAddress, DeviceId>,
) -> Vec<UnrecognizedDeviceView> {
    unrecognized
        .iter()
        .map(|device| {
            let network_device_id = owners.get(&device.mac).copied();
            UnrecognizedDeviceView {
                id: device.id,
                mac: device.mac,
                ip_address: device.ip_address,
                data: device.data.clone(),
                created_at: device.created_at,
                site_id: index.lookup(device.ip_address),
                found: network_device_id.is_some(),
                network_device_id,
            }
        })
        .collect()
}

/// Views belonging to one site
pub fn views_at_site(views: Vec<UnrecognizedDeviceView>, site_id: SiteId) -> Vec<UnrecognizedDeviceView> {
    views
        .into_iter()
        .filter(|view| view.site_id == Some(site_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory::{fixtures, BootHistory};

    fn site(id: SiteId, code: &str, network: &str) -> Site {
        let mut site = fixtures::site(code, network);
        site.id = id;
        site
    }

    fn unrecognized(last: u8, ip: &str, created_at: DateTime<Utc>) -> UnrecognizedPxeDevice {
        UnrecognizedPxeDevice {
            id: u64::from(last),
            mac: MacAddress::new([0x52, 0x54, 0, 0, 0, last]),
            ip_address: ip.parse().unwrap(),
            data: String::new(),
            created_at,
        }
    }

    #[test]
    fn test_dashboard_counts_window_and_site() {
        let now = Utc::now();
        let lsc = site(1, "lsc", "10.5.0.0/16");
        let coj = site(2, "coj", "10.6.0.0/16");
        let index = SiteIndex::new(&[lsc.clone(), coj.clone()]);

        let mut device = fixtures::puppet_device(1, "aa:bb:cc:dd:ee:01", Some("10.5.0.10"), &["h1"], "centos-7-x86_64");
        device.id = 10;
        let machine = device.puppet_machine.as_mut().unwrap();
        for (hours, mode) in [
            (1, BootMode::Rebuild),
            (2, BootMode::Local),
            (3, BootMode::Local),
            (30, BootMode::Rescue),
        ] {
            machine.boot_history.push(BootHistory {
                created_at: now - Duration::hours(hours),
                boot_mode: mode,
            });
        }

        let unrecognized = vec![
            unrecognized(1, "10.5.9.9", now - Duration::hours(2)),
            unrecognized(2, "10.5.9.8", now - Duration::hours(25)),
            unrecognized(3, "10.6.9.9", now - Duration::hours(1)),
        ];

        let data = dashboard(&lsc, &index, &[device], &unrecognized, now);
        assert_eq!(
            data,
            DashboardData {
                unrecognized_device_count: 1,
                boot_mode_local_count: 2,
                boot_mode_rebuild_count: 1,
                boot_mode_rebuildalt_count: 0,
                boot_mode_rescue_count: 0,
            }
        );
    }

    #[test]
    fn test_unrecognized_views_resolve_relations() {
        let now = Utc::now();
        let lsc = site(1, "lsc", "10.5.0.0/16");
        let index = SiteIndex::new(&[lsc]);

        let mut known = fixtures::device(1, vec![fixtures::interface("52:54:00:00:00:01", vec![])]);
        known.id = 77;
        let owners = mac_owners(&[known]);

        let views = unrecognized_views(
            &[
                unrecognized(1, "10.5.9.9", now),
                unrecognized(2, "192.168.0.5", now),
            ],
            &index,
            &owners,
        );
        assert!(views[0].found);
        assert_eq!(views[0].network_device_id, Some(77));
        assert_eq!(views[0].site_id, Some(1));
        assert!(!views[1].found);
        assert_eq!(views[1].site_id, None);

        let at_lsc = views_at_site(views, 1);
        assert_eq!(at_lsc.len(), 1);
    }
}
