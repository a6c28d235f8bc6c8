//! Ethernet hardware addresses
//!
//! Every MAC address entering the inventory is normalised to the canonical
//! lowercase, colon-delimited form (`aa:bb:cc:dd:ee:ff`) before it is stored
//! or used for a lookup. Hyphen-delimited input (`AA-BB-CC-DD-EE-FF`) and the
//! PXELinux `BOOTIF` form (`01-aa-bb-cc-dd-ee-ff`) are accepted.

use crate::error::InventoryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 48-bit Ethernet hardware address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// Build from raw octets
    #[must_use]
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Raw octets
    #[must_use]
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Parse the PXELinux `BOOTIF` value: an ARP hardware type followed by
    /// the six address octets, all hyphen separated (`01-52-54-00-e3-cc-00`).
    pub fn from_pxe_bootif(value: &str) -> Result<Self, InventoryError> {
        let mut groups = value.trim().split('-');
        match groups.next() {
            Some(hwtype) if !hwtype.is_empty() => {}
            _ => return Err(InventoryError::InvalidMacAddress(value.to_string())),
        }
        let rest: Vec<&str> = groups.collect();
        parse_groups(&rest).ok_or_else(|| InventoryError::InvalidMacAddress(value.to_string()))
    }
}

fn parse_groups(groups: &[&str]) -> Option<MacAddress> {
    if groups.len() != 6 {
        return None;
    }
    let mut octets = [0u8; 6];
    for (octet, group) in octets.iter_mut().zip(groups) {
        if group.len() != 2 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        *octet = u8::from_str_radix(group, 16).ok()?;
    }
    Some(MacAddress(octets))
}

impl FromStr for MacAddress {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let groups: Vec<&str> = s.trim().split([':', '-']).collect();
        parse_groups(&groups).ok_or_else(|| InventoryError::InvalidMacAddress(s.to_string()))
    }
}

impl TryFrom<String> for MacAddress {
    type Error = InventoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MacAddress> for String {
    fn from(value: MacAddress) -> Self {
        value.to_string()
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_form_is_lowercase_colon() {
        let mac: MacAddress = "52:54:00:E3:CC:00".parse().unwrap();
        assert_eq!(mac.to_string(), "52:54:00:e3:cc:00");
    }

    #[test]
    fn test_hyphen_delimited_input() {
        let hyphen: MacAddress = "52-54-00-e3-cc-00".parse().unwrap();
        let colon: MacAddress = "52:54:00:e3:cc:00".parse().unwrap();
        assert_eq!(hyphen, colon);
    }

    #[test]
    fn test_pxe_bootif() {
        let mac = MacAddress::from_pxe_bootif("01-52-54-00-E3-CC-00").unwrap();
        assert_eq!(mac.to_string(), "52:54:00:e3:cc:00");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!("52:54:00:e3:cc".parse::<MacAddress>().is_err());
        assert!("52:54:00:e3:cc:zz".parse::<MacAddress>().is_err());
        assert!("52:54:00:e3:cc:+f".parse::<MacAddress>().is_err());
        assert!(MacAddress::from_pxe_bootif("01-52-54-00-e3-cc-+f").is_err());
        assert!("525400e3cc00".parse::<MacAddress>().is_err());
        assert!(MacAddress::from_pxe_bootif("52-54-00-e3-cc-00").is_err());
        assert!(MacAddress::from_pxe_bootif("").is_err());
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let mac: MacAddress = serde_json::from_str("\"AA-BB-CC-DD-EE-FF\"").unwrap();
        assert_eq!(serde_json::to_string(&mac).unwrap(), "\"aa:bb:cc:dd:ee:ff\"");
    }
}
