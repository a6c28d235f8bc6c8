//! DNS record derivation
//!
//! Records for a site are emitted in a fixed order: the static infrastructure
//! records first, then per-device records in device order. For each addressed
//! configuration a device contributes one A record, one PTR record and one
//! CNAME per alias. DHCP-only configurations contribute nothing.

use crate::error::{RecordError, Result};
use chrono::{DateTime, Utc};
use inventory::{AddressConfiguration, NetworkDevice, Site};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// Supported DNS record types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    CNAME,
    PTR,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::CNAME => "CNAME",
            Self::PTR => "PTR",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single DNS record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub hostname: String,
    pub record_type: RecordType,
    pub target: String,
}

impl DnsRecord {
    fn new(hostname: impl Into<String>, record_type: RecordType, target: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            record_type,
            target: target.into(),
        }
    }
}

/// Reverse lookup name for an IPv4 address (`4.3.2.1.in-addr.arpa`)
pub fn reverse_pointer(address: Ipv4Addr) -> String {
    let [a, b, c, d] = address.octets();
    format!("{d}.{c}.{b}.{a}.in-addr.arpa")
}

/// Border router addresses and fixed service aliases for a site
pub fn static_records(site: &Site) -> Vec<DnsRecord> {
    let domain = &site.domain;
    let pubsub = format!("pubsub.{domain}");
    vec![
        DnsRecord::new(
            format!("borderexternal.{domain}"),
            RecordType::A,
            site.external.border_external.to_string(),
        ),
        DnsRecord::new(
            format!("borderuplink.{domain}"),
            RecordType::A,
            site.external.border_uplink.to_string(),
        ),
        DnsRecord::new(format!("border.{domain}"), RecordType::A, site.gateway.to_string()),
        DnsRecord::new(format!("jadehost.{domain}"), RecordType::CNAME, pubsub.clone()),
        DnsRecord::new(format!("jtcs.{domain}"), RecordType::CNAME, pubsub.clone()),
        DnsRecord::new(format!("pubsubhost.{domain}"), RecordType::CNAME, pubsub),
        DnsRecord::new(format!("dbhost.{domain}"), RecordType::CNAME, format!("pubsubdb.{domain}")),
    ]
}

fn configuration_records(
    device: &NetworkDevice,
    configuration: &AddressConfiguration,
    records: &mut Vec<DnsRecord>,
) -> Result<()> {
    let Some(address) = configuration.ip_address else {
        return Ok(());
    };
    let primary = configuration
        .primary_hostname()
        .ok_or(RecordError::MissingHostname { device: device.id, address })?;

    records.push(DnsRecord::new(primary, RecordType::A, address.to_string()));
    records.push(DnsRecord::new(reverse_pointer(address), RecordType::PTR, primary));
    for alias in configuration.aliases() {
        records.push(DnsRecord::new(alias.as_str(), RecordType::CNAME, primary));
    }
    Ok(())
}

/// All DNS records published for one device
pub fn device_records(device: &NetworkDevice) -> Result<Vec<DnsRecord>> {
    let mut records = Vec::new();
    for interface in &device.interfaces {
        for configuration in &interface.configurations {
            configuration_records(device, configuration, &mut records)?;
        }
    }
    Ok(records)
}

/// All DNS records for a site: static records, then each device in order
pub fn site_records(site: &Site, devices: &[NetworkDevice]) -> Result<Vec<DnsRecord>> {
    let mut records = static_records(site);
    for device in devices {
        records.extend(device_records(device)?);
    }
    Ok(records)
}

/// Zone serial number `YYYYMMDDNN`
///
/// The date is that of the most recent update among the site and its
/// devices; `NN` is the number of devices updated since 00:00 UTC on the
/// day of `now`.
pub fn dns_serial(site: &Site, devices: &[NetworkDevice], now: DateTime<Utc>) -> String {
    let today = now.date_naive().and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());
    let latest = devices
        .iter()
        .map(|device| device.updated_at)
        .fold(site.updated_at, std::cmp::max);
    let updated_today = devices
        .iter()
        .filter(|device| today.is_some_and(|today| device.updated_at >= today))
        .count();
    format!("{}{:02}", latest.format("%Y%m%d"), updated_today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use inventory::fixtures;

    fn site() -> Site {
        let mut site = fixtures::site("lsc", "10.5.0.0/16");
        site.id = 1;
        site
    }

    fn record(hostname: &str, record_type: RecordType, target: &str) -> DnsRecord {
        DnsRecord::new(hostname, record_type, target)
    }

    #[test]
    fn test_reverse_pointer() {
        assert_eq!(reverse_pointer("10.5.0.10".parse().unwrap()), "10.0.5.10.in-addr.arpa");
    }

    #[test]
    fn test_a_ptr_then_aliases() {
        let device = fixtures::device(
            1,
            vec![fixtures::interface(
                "aa:bb:cc:dd:ee:01",
                vec![fixtures::configuration(Some("10.5.0.10"), &["h1", "h2", "h3"])],
            )],
        );
        assert_eq!(
            device_records(&device).unwrap(),
            vec![
                record("h1", RecordType::A, "10.5.0.10"),
                record("10.0.5.10.in-addr.arpa", RecordType::PTR, "h1"),
                record("h2", RecordType::CNAME, "h1"),
                record("h3", RecordType::CNAME, "h1"),
            ]
        );
    }

    #[test]
    fn test_dhcp_configurations_publish_nothing() {
        let device = fixtures::device(
            1,
            vec![fixtures::interface(
                "aa:bb:cc:dd:ee:01",
                vec![
                    fixtures::configuration(None, &["dyn1", "dyn1-alias"]),
                    fixtures::configuration(Some("10.5.0.11"), &["late1"]),
                ],
            )],
        );
        let records = device_records(&device).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], record("late1", RecordType::A, "10.5.0.11"));
    }

    #[test]
    fn test_missing_hostname_fails() {
        let mut device = fixtures::device(
            1,
            vec![fixtures::interface(
                "aa:bb:cc:dd:ee:01",
                vec![fixtures::configuration(Some("10.5.0.10"), &[])],
            )],
        );
        device.id = 42;
        let err = device_records(&device).unwrap_err();
        assert!(matches!(err, RecordError::MissingHostname { device: 42, .. }));
    }

    #[test]
    fn test_site_records_start_with_static_records() {
        let site = site();
        let device = fixtures::device(
            site.id,
            vec![fixtures::interface(
                "aa:bb:cc:dd:ee:01",
                vec![fixtures::configuration(Some("10.5.0.10"), &["web1.lsc.lco.gtn"])],
            )],
        );
        let records = site_records(&site, &[device]).unwrap();

        assert_eq!(records.len(), 9);
        assert_eq!(records[0], record("borderexternal.lsc.lco.gtn", RecordType::A, "198.51.100.10"));
        assert_eq!(records[1], record("borderuplink.lsc.lco.gtn", RecordType::A, "198.51.100.1"));
        assert_eq!(records[2], record("border.lsc.lco.gtn", RecordType::A, "10.5.0.254"));
        assert_eq!(records[3], record("jadehost.lsc.lco.gtn", RecordType::CNAME, "pubsub.lsc.lco.gtn"));
        assert_eq!(records[6], record("dbhost.lsc.lco.gtn", RecordType::CNAME, "pubsubdb.lsc.lco.gtn"));
        assert_eq!(records[7], record("web1.lsc.lco.gtn", RecordType::A, "10.5.0.10"));
    }

    #[test]
    fn test_dns_serial() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 15, 0, 0).unwrap();
        let mut site = site();
        site.updated_at = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();

        let mut early = fixtures::device(site.id, vec![]);
        early.updated_at = Utc.with_ymd_and_hms(2024, 3, 9, 1, 0, 0).unwrap();
        let mut late = fixtures::device(site.id, vec![]);
        late.updated_at = Utc.with_ymd_and_hms(2024, 3, 9, 9, 30, 0).unwrap();
        let mut old = fixtures::device(site.id, vec![]);
        old.updated_at = Utc.with_ymd_and_hms(2024, 3, 8, 23, 59, 59).unwrap();

        assert_eq!(dns_serial(&site, &[early, late, old], now), "2024030902");
        assert_eq!(dns_serial(&site, &[], now), "2024010200");
    }

    #[test]
    fn test_record_type_serializes_uppercase() {
        let json = serde_json::to_string(&record("h1", RecordType::PTR, "x")).unwrap();
        assert_eq!(json, r#"{"hostname":"h1","record_type":"PTR","target":"x"}"#);
    }
}
