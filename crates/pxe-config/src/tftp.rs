//! PXELinux kernel command line elements
//!
//! Builds the network configuration and extra installer flags that end up
//! on the `append` line of the TFTP boot configuration. The address used is
//! the device's primary static address; without one the install uses DHCP.

use crate::error::{PxeError, Result};
use crate::platform::CentosRelease;
use inventory::{MacAddress, NetworkDevice, Site};

fn join<I, S>(items: I, separator: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: ToString,
{
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Network configuration for the installer kernel command line
///
/// CentOS 5 is always DHCP: a static configuration does not fit its command
/// line length limit, and the Kickstart file configures the real address.
pub fn network_configuration(
    release: CentosRelease,
    site: &Site,
    device: &NetworkDevice,
    mac: &MacAddress,
) -> Result<String> {
    let mut elements = vec![match release {
        CentosRelease::V5 => "ksdevice=eth0".to_string(),
        _ => "ksdevice=bootif".to_string(),
    }];

    match (release, device.primary_static_ip()) {
        (CentosRelease::V5, _) | (_, None) => elements.push("ip=dhcp".to_string()),
        (CentosRelease::V6, Some(address)) => {
            elements.push(format!("ip={address}"));
            elements.push(format!("netmask={}", site.netmask()));
            elements.push(format!("gateway={}", site.gateway));
            elements.push(format!("dns={}", join(&site.dns_servers, ",")));
        }
        (CentosRelease::V7 | CentosRelease::V8, Some(address)) => {
            let hostname = device
                .primary_hostname()
                .ok_or(PxeError::MissingHostname(device.id))?;
            elements.push(format!("ifname=eth0:{mac}"));
            elements.push(format!(
                "ip={address}::{}:{}:{hostname}:eth0:none",
                site.gateway,
                site.netmask()
            ));
            elements.extend(site.dns_servers.iter().map(|server| format!("nameserver={server}")));
        }
    }
    Ok(elements.join(" "))
}

/// Extra installer flags
///
/// Anaconda's SSH monitoring flag is spelled `sshd=1` on CentOS 6 and `sshd`
/// from CentOS 7. Hosts whose primary hostname starts with
/// `legacy_text_mode_prefix` cannot render the graphical installer on 7+.
pub fn extra_flags(release: CentosRelease, device: &NetworkDevice, legacy_text_mode_prefix: &str) -> String {
    let mut extra = Vec::new();
    match release {
        CentosRelease::V5 => {}
        CentosRelease::V6 => extra.push("sshd=1"),
        CentosRelease::V7 | CentosRelease::V8 => extra.push("sshd"),
    }

    let legacy_hardware = device
        .primary_hostname()
        .is_some_and(|hostname| hostname.starts_with(legacy_text_mode_prefix));
    if legacy_hardware && release >= CentosRelease::V7 {
        extra.push("inst.text");
    }
    extra.join(" ")
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

    fn device(ip: Option<&str>, hostname: &str) -> NetworkDevice {
        fixtures::puppet_device(1, MAC, ip, &[hostname], "centos-7-x86_64")
    }

    fn mac() -> MacAddress {
        MAC.parse().unwrap()
    }

    #[test]
    fn test_centos5_always_dhcp() {
        let config = network_configuration(CentosRelease::V5, &site(), &device(Some("10.5.0.10"), "h1"), &mac()).unwrap();
        assert_eq!(config, "ksdevice=eth0 ip=dhcp");
    }

    #[test]
    fn test_no_static_address_is_dhcp() {
        for release in [CentosRelease::V6, CentosRelease::V7, CentosRelease::V8] {
            let config = network_configuration(release, &site(), &device(None, "h1"), &mac()).unwrap();
            assert_eq!(config, "ksdevice=bootif ip=dhcp");
        }
    }

    #[test]
    fn test_centos6_static() {
        let config = network_configuration(CentosRelease::V6, &site(), &device(Some("10.5.0.10"), "h1"), &mac()).unwrap();
        assert_eq!(
            config,
            "ksdevice=bootif ip=10.5.0.10 netmask=255.255.0.0 gateway=10.5.0.254 dns=10.5.0.2,10.5.0.3"
        );
    }

    #[test]
    fn test_centos7_static() {
        let config = network_configuration(CentosRelease::V7, &site(), &device(Some("10.5.0.10"), "h1.lsc.lco.gtn"), &mac()).unwrap();
        assert_eq!(
            config,
            "ksdevice=bootif ifname=eth0:52:54:00:e3:cc:00 \
             ip=10.5.0.10::10.5.0.254:255.255.0.0:h1.lsc.lco.gtn:eth0:none \
             nameserver=10.5.0.2 nameserver=10.5.0.3"
        );
        let nameservers = config.split(' ').filter(|token| token.starts_with("nameserver=")).count();
        assert_eq!(nameservers, site().dns_servers.len());
    }

    #[test]
    fn test_centos8_matches_centos7() {
        let device = device(Some("10.5.0.10"), "h1");
        assert_eq!(
            network_configuration(CentosRelease::V8, &site(), &device, &mac()).unwrap(),
            network_configuration(CentosRelease::V7, &site(), &device, &mac()).unwrap()
        );
    }

    #[test]
    fn test_extra_flags() {
        let plain = device(None, "web1.lsc.lco.gtn");
        let legacy = device(None, "fs.lsc.lco.gtn");
        assert_eq!(extra_flags(CentosRelease::V5, &legacy, "fs."), "");
        assert_eq!(extra_flags(CentosRelease::V6, &legacy, "fs."), "sshd=1");
        assert_eq!(extra_flags(CentosRelease::V7, &plain, "fs."), "sshd");
        assert_eq!(extra_flags(CentosRelease::V8, &legacy, "fs."), "sshd inst.text");
    }
}
