//! Builders for inventory test data
//!
//! Enabled with the `test-util` feature so downstream crates can build
//! realistic sites and devices without repeating every field.

use crate::models::*;
use chrono::Utc;

/// A site with a `<code>.lco.gtn` domain, gateway at `.254` of the first /24
/// and two DNS servers inside the network
pub fn site(code: &str, network: &str) -> Site {
    let network: ipnetwork::Ipv4Network = network.parse().expect("valid site network");
    let base = u32::from(network.network());
    Site {
        id: 0,
        code: code.to_string(),
        short_description: code.to_uppercase(),
        description: format!("{code} test site"),
        domain: format!("{code}.lco.gtn"),
        network,
        gateway: (base + 254).into(),
        dns_servers: vec![(base + 2).into(), (base + 3).into()],
        external: ExternalNetwork {
            network: None,
            border_external: "198.51.100.10".parse().expect("valid address"),
            border_uplink: "198.51.100.1".parse().expect("valid address"),
            site_to_site_vpn: "198.51.100.11".parse().expect("valid address"),
        },
        location: GeoLocation::default(),
        timezone: "Etc/UTC".to_string(),
        restart_time: chrono::NaiveTime::default(),
        mirror_base: format!("http://core1.{code}.lco.gtn/repos"),
        mirror_base_alt: format!("http://mirror-alt.{code}.lco.gtn/repos"),
        ntp_servers: vec![NtpServer {
            hostname: format!("ntp.{code}.lco.gtn"),
            options: "iburst".to_string(),
        }],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Address configuration; `None` is DHCP
pub fn configuration(ip: Option<&str>, hostnames: &[&str]) -> AddressConfiguration {
    AddressConfiguration {
        ip_address: ip.map(|ip| ip.parse().expect("valid IPv4 address")),
        hostnames: hostnames.iter().map(ToString::to_string).collect(),
    }
}

pub fn interface(mac: &str, configurations: Vec<AddressConfiguration>) -> NetworkInterface {
    NetworkInterface {
        description: String::new(),
        mac: mac.parse().expect("valid MAC address"),
        configurations,
    }
}

/// PuppetMachine in its initial state for the given operating system
pub fn puppet_machine(operating_system: &str) -> PuppetMachine {
    PuppetMachine {
        operating_system: operating_system.parse().expect("valid operating system"),
        ..PuppetMachine::default()
    }
}

pub fn device(site_id: SiteId, interfaces: Vec<NetworkInterface>) -> NetworkDevice {
    NetworkDevice {
        id: 0,
        site_id,
        image: None,
        information: String::new(),
        fmx_url: String::new(),
        interfaces,
        puppet_machine: None,
        webcam: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Single-interface Puppet-managed device
pub fn puppet_device(
    site_id: SiteId,
    mac: &str,
    ip: Option<&str>,
    hostnames: &[&str],
    operating_system: &str,
) -> NetworkDevice {
    let mut device = device(site_id, vec![interface(mac, vec![configuration(ip, hostnames)])]);
    device.puppet_machine = Some(puppet_machine(operating_system));
    device
}
