//! BIND zone and hosts-file rows
//!
//! Turns derived DNS records into fully qualified, column-aligned rows ready
//! for the forward zone, the reverse zone and an `/etc/hosts` style file.
//! Every row of a table is padded to the same column widths.

use crate::dns::{DnsRecord, RecordType};
use inventory::{NetworkDevice, Site};
use std::net::Ipv4Addr;

/// One aligned line of output, split into columns
pub type Row = Vec<String>;

/// Left-justify each column to its widest value
pub fn columnar(rows: Vec<Row>) -> Vec<Row> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|column| {
            rows.iter()
                .filter_map(|row| row.get(column))
                .map(String::len)
                .max()
                .unwrap_or(0)
        })
        .collect();

    rows.into_iter()
        .map(|row| {
            row.into_iter()
                .zip(&widths)
                .map(|(value, width)| format!("{value:<width$}"))
                .collect()
        })
        .collect()
}

fn ns_row(site: &Site) -> Row {
    vec![
        format!("{}.", site.domain),
        "NS".to_string(),
        format!("core1.{}.", site.domain),
    ]
}

/// Forward zone: NS, then A and CNAME records with trailing dots
pub fn forward_rows(site: &Site, records: &[DnsRecord]) -> Vec<Row> {
    let mut rows = vec![ns_row(site)];
    for record in records {
        let target = match record.record_type {
            RecordType::A => record.target.clone(),
            RecordType::CNAME => format!("{}.", record.target),
            RecordType::PTR => continue,
        };
        rows.push(vec![
            format!("{}.", record.hostname),
            record.record_type.to_string(),
            target,
        ]);
    }
    columnar(rows)
}

/// Reverse zone: NS, then PTR records with trailing dots on both sides
pub fn reverse_rows(site: &Site, records: &[DnsRecord]) -> Vec<Row> {
    let mut rows = vec![ns_row(site)];
    rows.extend(
        records
            .iter()
            .filter(|record| record.record_type == RecordType::PTR)
            .map(|record| {
                vec![
                    format!("{}.", record.hostname),
                    record.record_type.to_string(),
                    format!("{}.", record.target),
                ]
            }),
    );
    columnar(rows)
}

/// Hosts file: one line per addressed configuration, sorted by address
pub fn hosts_rows(devices: &[NetworkDevice]) -> Vec<Row> {
    let mut entries: Vec<(Ipv4Addr, String)> = devices
        .iter()
        .flat_map(|device| &device.interfaces)
        .flat_map(|interface| &interface.configurations)
        .filter_map(|configuration| {
            configuration
                .ip_address
                .map(|address| (address, configuration.hostnames.join(" ")))
        })
        .collect();
    entries.sort_by_key(|(address, _)| *address);

    columnar(
        entries
            .into_iter()
            .map(|(address, hostnames)| vec![address.to_string(), hostnames])
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns;
    use inventory::fixtures;

    #[test]
    fn test_columnar_pads_to_widest_value() {
        let rows = columnar(vec![
            vec!["a".to_string(), "bbb".to_string()],
            vec!["cccc".to_string(), "d".to_string()],
        ]);
        assert_eq!(rows[0], vec!["a   ".to_string(), "bbb".to_string()]);
        assert_eq!(rows[1], vec!["cccc".to_string(), "d  ".to_string()]);
    }

    #[test]
    fn test_forward_and_reverse_rows() {
        let site = fixtures::site("lsc", "10.5.0.0/16");
        let device = fixtures::device(
            1,
            vec![fixtures::interface(
                "aa:bb:cc:dd:ee:01",
                vec![fixtures::configuration(Some("10.5.0.10"), &["h1.lsc.lco.gtn", "h2.lsc.lco.gtn"])],
            )],
        );
        let records = dns::device_records(&device).unwrap();

        let forward = forward_rows(&site, &records);
        assert_eq!(forward.len(), 3);
        assert_eq!(forward[0][0].trim_end(), "lsc.lco.gtn.");
        assert_eq!(forward[0][2].trim_end(), "core1.lsc.lco.gtn.");
        assert_eq!(forward[1][2].trim_end(), "10.5.0.10");
        assert_eq!(forward[2][1].trim_end(), "CNAME");
        assert_eq!(forward[2][2].trim_end(), "h1.lsc.lco.gtn.");

        let reverse = reverse_rows(&site, &records);
        assert_eq!(reverse.len(), 2);
        assert_eq!(reverse[1][0].trim_end(), "10.0.5.10.in-addr.arpa.");
        assert_eq!(reverse[1][2].trim_end(), "h1.lsc.lco.gtn.");
    }

    #[test]
    fn test_hosts_rows_sorted_by_address() {
        let device = fixtures::device(
            1,
            vec![
                fixtures::interface(
                    "aa:bb:cc:dd:ee:01",
                    vec![fixtures::configuration(Some("10.5.0.100"), &["b1", "b2"])],
                ),
                fixtures::interface(
                    "aa:bb:cc:dd:ee:02",
                    vec![
                        fixtures::configuration(Some("10.5.0.9"), &["a1"]),
                        fixtures::configuration(None, &["dyn"]),
                    ],
                ),
            ],
        );
        let rows = hosts_rows(&[device]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0].trim_end(), "10.5.0.9");
        assert_eq!(rows[1][1].trim_end(), "b1 b2");
    }
}
