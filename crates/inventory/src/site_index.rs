//! Longest-prefix lookup from an IPv4 address to the owning site

use crate::models::{Site, SiteId};
use ipnetwork::Ipv4Network;
use std::collections::{BTreeSet, HashMap};
use std::net::Ipv4Addr;

/// Site networks keyed by (prefix length, network address)
#[derive(Debug, Clone, Default)]
pub struct SiteIndex {
    networks: HashMap<(u8, Ipv4Addr), SiteId>,
    /// Prefix lengths present, searched longest first
    prefixes: BTreeSet<u8>,
}

impl SiteIndex {
    #[must_use]
    pub fn new(sites: &[Site]) -> Self {
        let mut index = Self::default();
        for site in sites {
            index.insert(site);
        }
        index
    }

    pub fn insert(&mut self, site: &Site) {
        let prefix = site.network.prefix();
        let key = (prefix, site.network.network());
        self.networks.insert(key, site.id);
        self.prefixes.insert(prefix);
    }

    /// Site whose network is the most specific match for `address`
    #[must_use]
    pub fn lookup(&self, address: Ipv4Addr) -> Option<SiteId> {
        self.prefixes
            .iter()
            .rev()
            .find_map(|&prefix| {
                let candidate = Ipv4Network::new(address, prefix).ok()?;
                self.networks.get(&(prefix, candidate.network()))
            })
            .copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(id: SiteId, network: &str) -> Site {
        let network: Ipv4Network = network.parse().unwrap();
        Site {
            id,
            code: format!("s{id:02}"),
            short_description: String::new(),
            description: String::new(),
            domain: format!("s{id}.lco.gtn"),
            network,
            gateway: network.ip(),
            dns_servers: vec![],
            external: Default::default(),
            location: Default::default(),
            timezone: "Etc/UTC".to_string(),
            restart_time: Default::default(),
            mirror_base: String::new(),
            mirror_base_alt: String::new(),
            ntp_servers: vec![],
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_most_specific_network_wins() {
        let index = SiteIndex::new(&[site(1, "10.0.0.0/8"), site(2, "10.5.0.0/16")]);
        assert_eq!(index.lookup("10.5.3.4".parse().unwrap()), Some(2));
        assert_eq!(index.lookup("10.6.3.4".parse().unwrap()), Some(1));
        assert_eq!(index.lookup("192.168.1.1".parse().unwrap()), None);
    }

    #[test]
    fn test_host_bits_in_site_network_are_ignored() {
        let index = SiteIndex::new(&[site(1, "10.5.0.1/16")]);
        assert_eq!(index.lookup("10.5.200.9".parse().unwrap()), Some(1));
        assert_eq!(index.lookup("10.4.0.1".parse().unwrap()), None);
    }

    #[test]
    fn test_default_route_matches_everything() {
        let index = SiteIndex::new(&[site(1, "0.0.0.0/0")]);
        assert_eq!(index.lookup("203.0.113.9".parse().unwrap()), Some(1));
    }

    #[test]
    fn test_empty_index() {
        let index = SiteIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.lookup("10.0.0.1".parse().unwrap()), None);
    }
}
