//! Anaconda Kickstart `network` directive
//!
//! Static or DHCP is decided by the interface the machine booted from: it is
//! static when that interface's primary configuration carries an address.

use crate::error::{PxeError, Result};
use crate::platform::CentosRelease;
use inventory::{MacAddress, NetworkDevice, Site};
use std::net::Ipv4Addr;

/// Whether the boot interface gets a static address or DHCP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootProto {
    Dhcp,
    Static(Ipv4Addr),
}

impl BootProto {
    pub fn for_interface(device: &NetworkDevice, mac: &MacAddress) -> Self {
        device
            .find_interface(mac)
            .and_then(|interface| interface.primary_static_ip())
            .map_or(Self::Dhcp, Self::Static)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dhcp => "dhcp",
            Self::Static(_) => "static",
        }
    }
}

/// `network --bootproto=... --device=... [--hostname=...] [static options]`
pub fn network_configuration(
    release: CentosRelease,
    site: &Site,
    device: &NetworkDevice,
    mac: &MacAddress,
) -> Result<String> {
    let interface = device
        .find_interface(mac)
        .ok_or(PxeError::UnknownInterface { device: device.id, mac: *mac })?;
    let bootproto = BootProto::for_interface(device, mac);

    let mut elements = vec!["network".to_string(), format!("--bootproto={}", bootproto.as_str())];
    elements.push(match release {
        CentosRelease::V5 => "--device=eth0".to_string(),
        _ => format!("--device={mac}"),
    });
    if let Some(hostname) = interface.primary_hostname() {
        elements.push(format!("--hostname={hostname}"));
    }

    let BootProto::Static(address) = bootproto else {
        return Ok(elements.join(" "));
    };
    elements.push(format!("--ip={address}"));
    elements.push(format!("--netmask={}", site.netmask()));
    elements.push(format!("--gateway={}", site.gateway));

    if let Some(first) = site.dns_servers.first() {
        match release {
            CentosRelease::V5 => elements.push(format!("--nameserver={first}")),
            CentosRelease::V6 => {
                let servers: Vec<String> = site.dns_servers.iter().map(ToString::to_string).collect();
                elements.push(format!("--nameserver={}", servers.join(",")));
            }
            CentosRelease::V7 | CentosRelease::V8 => {
                elements.extend(site.dns_servers.iter().map(|server| format!("--nameserver={server}")));
            }
        }
    }
    Ok(elements.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory::fixtures;

    const MAC: &str = "52:54:00:e3:cc:00";

    fn site() -> Site {
        let mut site = fixtures::site("lsc", "10.5.0.0/16");
        site.dns_servers = vec!["10.5.0.2".parse().unwrap(), "10.5.0.3".parse().unwrap()];
        site
    }

    fn device(ip: Option<&str>) -> NetworkDevice {
        fixtures::puppet_device(1, MAC, ip, &["h1.lsc.lco.gtn"], "centos-7-x86_64")
    }

    fn mac() -> MacAddress {
        MAC.parse().unwrap()
    }

    #[test]
    fn test_dhcp() {
        let line = network_configuration(CentosRelease::V7, &site(), &device(None), &mac()).unwrap();
        assert_eq!(
            line,
            "network --bootproto=dhcp --device=52:54:00:e3:cc:00 --hostname=h1.lsc.lco.gtn"
        );
    }

    #[test]
    fn test_nameservers_per_release() {
        let device = device(Some("10.5.0.10"));
        let prefix = "--ip=10.5.0.10 --netmask=255.255.0.0 --gateway=10.5.0.254";

        let v5 = network_configuration(CentosRelease::V5, &site(), &device, &mac()).unwrap();
        assert_eq!(
            v5,
            format!("network --bootproto=static --device=eth0 --hostname=h1.lsc.lco.gtn {prefix} --nameserver=10.5.0.2")
        );

        let v6 = network_configuration(CentosRelease::V6, &site(), &device, &mac()).unwrap();
        assert!(v6.ends_with(&format!("{prefix} --nameserver=10.5.0.2,10.5.0.3")));

        let v7 = network_configuration(CentosRelease::V7, &site(), &device, &mac()).unwrap();
        assert!(v7.ends_with(&format!("{prefix} --nameserver=10.5.0.2 --nameserver=10.5.0.3")));
    }

    #[test]
    fn test_no_dns_servers() {
        let mut site = site();
        site.dns_servers.clear();
        let line = network_configuration(CentosRelease::V7, &site, &device(Some("10.5.0.10")), &mac()).unwrap();
        assert!(line.ends_with("--gateway=10.5.0.254"));
    }

    #[test]
    fn test_bootproto_follows_requested_interface() {
        let mut device = fixtures::device(
            1,
            vec![
                fixtures::interface(
                    "aa:bb:cc:dd:ee:01",
                    vec![fixtures::configuration(Some("10.5.0.10"), &["h1"])],
                ),
                fixtures::interface("aa:bb:cc:dd:ee:02", vec![fixtures::configuration(None, &["h1-dyn"])]),
            ],
        );
        device.puppet_machine = Some(fixtures::puppet_machine("centos-7-x86_64"));

        let second: MacAddress = "aa:bb:cc:dd:ee:02".parse().unwrap();
        let line = network_configuration(CentosRelease::V7, &site(), &device, &second).unwrap();
        assert_eq!(
            line,
            "network --bootproto=dhcp --device=aa:bb:cc:dd:ee:02 --hostname=h1-dyn"
        );
    }

    #[test]
    fn test_unknown_interface() {
        let other: MacAddress = "aa:bb:cc:dd:ee:99".parse().unwrap();
        let err = network_configuration(CentosRelease::V7, &site(), &device(None), &other).unwrap_err();
        assert!(matches!(err, PxeError::UnknownInterface { .. }));
    }
}
