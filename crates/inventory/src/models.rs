//! Inventory models
//!
//! The graph is Site → NetworkDevice → NetworkInterface → AddressConfiguration
//! → hostnames, plus the one-to-one PuppetMachine and Webcam records owned by
//! a device. Child collections are ordered sequences: the entry at index 0 is
//! the "primary" one (primary address configuration, primary hostname).

use crate::error::InventoryError;
use crate::mac::MacAddress;
use chrono::{DateTime, NaiveTime, Utc};
use ipnetwork::Ipv4Network;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Site primary key
pub type SiteId = u64;

/// NetworkDevice primary key (shared by its PuppetMachine and Webcam)
pub type DeviceId = u64;

/// A datacenter / telescope site
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct Site {
    #[serde(default)]
    pub id: SiteId,
    /// Three letter site code, globally unique
    pub code: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    /// Network domain, globally unique
    pub domain: String,
    /// Internal network (network address + prefix length)
    pub network: Ipv4Network,
    pub gateway: Ipv4Addr,
    /// DNS servers in resolver order
    #[serde(default)]
    pub dns_servers: Vec<Ipv4Addr>,
    #[serde(default)]
    pub external: ExternalNetwork,
    #[serde(default)]
    pub location: GeoLocation,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub restart_time: NaiveTime,
    /// Primary package mirror
    pub mirror_base: String,
    /// Alternate package mirror
    pub mirror_base_alt: String,
    #[serde(default)]
    pub ntp_servers: Vec<NtpServer>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_timezone() -> String {
    "Etc/UTC".to_string()
}

impl Site {
    /// Netmask of the internal network
    #[must_use]
    pub fn netmask(&self) -> Ipv4Addr {
        self.network.mask()
    }

    /// Whether `address` falls inside the internal network
    #[must_use]
    pub fn contains(&self, address: Ipv4Addr) -> bool {
        self.network.contains(address)
    }

    /// Check the structural invariants of a site record
    pub fn validate(&self) -> Result<(), InventoryError> {
        if self.code.len() != 3 || !self.code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(InventoryError::InvalidRequest(format!(
                "site code \"{}\" must be three letters",
                self.code
            )));
        }
        if self.domain.is_empty() {
            return Err(InventoryError::InvalidRequest(format!(
                "site {} has an empty domain",
                self.code
            )));
        }
        if self.network.ip() != self.network.network() {
            return Err(InventoryError::InvalidNetwork(format!(
                "{} has host bits set (network address is {})",
                self.network,
                self.network.network()
            )));
        }
        Ok(())
    }
}

/// External (border) addressing for a site
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ExternalNetwork {
    #[serde(default)]
    pub network: Option<Ipv4Network>,
    /// Border router external address
    pub border_external: Ipv4Addr,
    /// Border router next-hop uplink address
    pub border_uplink: Ipv4Addr,
    /// IPSec VPN backend address
    pub site_to_site_vpn: Ipv4Addr,
}

impl Default for ExternalNetwork {
    fn default() -> Self {
        Self {
            network: None,
            border_external: Ipv4Addr::UNSPECIFIED,
            border_uplink: Ipv4Addr::UNSPECIFIED,
            site_to_site_vpn: Ipv4Addr::UNSPECIFIED,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// NTP server owned by a site, kept in creation order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct NtpServer {
    pub hostname: String,
    /// chronyd options, e.g. "iburst prefer minpoll 4 maxpoll 4"
    #[serde(default)]
    pub options: String,
}

/// Any physical or virtual device with one or more network interfaces
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct NetworkDevice {
    #[serde(default)]
    pub id: DeviceId,
    #[serde(default)]
    pub site_id: SiteId,
    #[serde(default)]
    pub image: Option<String>,
    /// Free-form notes (HTML or Markdown)
    #[serde(default)]
    pub information: String,
    #[serde(default)]
    pub fmx_url: String,
    #[serde(default)]
    pub interfaces: Vec<NetworkInterface>,
    #[serde(default)]
    pub puppet_machine: Option<PuppetMachine>,
    #[serde(default)]
    pub webcam: Option<Webcam>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl NetworkDevice {
    /// Interface with the given hardware address
    #[must_use]
    pub fn find_interface(&self, mac: &MacAddress) -> Option<&NetworkInterface> {
        self.interfaces.iter().find(|interface| interface.mac == *mac)
    }

    /// First configured hardware address
    #[must_use]
    pub fn primary_mac(&self) -> Option<MacAddress> {
        self.interfaces.first().map(|interface| interface.mac)
    }

    /// First address configuration in stored order, across all interfaces
    #[must_use]
    pub fn primary_configuration(&self) -> Option<&AddressConfiguration> {
        self.interfaces
            .iter()
            .find_map(NetworkInterface::primary_configuration)
    }

    /// Address of the primary configuration; `None` means DHCP
    #[must_use]
    pub fn primary_static_ip(&self) -> Option<Ipv4Addr> {
        self.primary_configuration()
            .and_then(|configuration| configuration.ip_address)
    }

    /// First hostname in stored order, across all interfaces
    #[must_use]
    pub fn primary_hostname(&self) -> Option<&str> {
        self.interfaces
            .iter()
            .find_map(NetworkInterface::primary_hostname)
    }

    /// All hostnames owned by this device
    pub fn hostnames(&self) -> impl Iterator<Item = &str> {
        self.interfaces
            .iter()
            .flat_map(|interface| &interface.configurations)
            .flat_map(|configuration| configuration.hostnames.iter().map(String::as_str))
    }

    /// The PuppetMachine record, or a data-integrity error naming the device
    pub fn puppet_machine(&self) -> Result<&PuppetMachine, InventoryError> {
        self.puppet_machine
            .as_ref()
            .ok_or(InventoryError::NotPuppetManaged(self.id))
    }
}

/// A single Ethernet interface
///
/// With no addressed configuration the interface is DHCP only; with one or
/// more it is DHCP plus a static reservation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct NetworkInterface {
    #[serde(default)]
    pub description: String,
    pub mac: MacAddress,
    #[serde(default)]
    pub configurations: Vec<AddressConfiguration>,
}

impl NetworkInterface {
    #[must_use]
    pub fn primary_configuration(&self) -> Option<&AddressConfiguration> {
        self.configurations.first()
    }

    #[must_use]
    pub fn primary_static_ip(&self) -> Option<Ipv4Addr> {
        self.primary_configuration()
            .and_then(|configuration| configuration.ip_address)
    }

    #[must_use]
    pub fn primary_hostname(&self) -> Option<&str> {
        self.configurations
            .iter()
            .find_map(AddressConfiguration::primary_hostname)
    }
}

/// An IPv4 address configuration and the names it is published under
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct AddressConfiguration {
    /// `None` for a DHCP-only configuration
    #[serde(default)]
    pub ip_address: Option<Ipv4Addr>,
    /// Primary hostname first, aliases after
    #[serde(default)]
    pub hostnames: Vec<String>,
}

impl AddressConfiguration {
    #[must_use]
    pub fn primary_hostname(&self) -> Option<&str> {
        self.hostnames.first().map(String::as_str)
    }

    #[must_use]
    pub fn aliases(&self) -> &[String] {
        self.hostnames.get(1..).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Webcam {
    pub admin_url: String,
    pub image_url: String,
    #[serde(default = "default_true")]
    pub is_enabled: bool,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub is_dome: bool,
}

fn default_true() -> bool {
    true
}

/// Operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsType {
    /// Anaconda / Kickstart based Linux distribution
    Centos,
    /// Proxmox Virtual Environment
    Proxmox,
}

impl OsType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Centos => "centos",
            Self::Proxmox => "proxmox",
        }
    }
}

impl FromStr for OsType {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "centos" => Ok(Self::Centos),
            "proxmox" => Ok(Self::Proxmox),
            other => Err(InventoryError::InvalidOperatingSystem(format!(
                "unknown operating system type \"{other}\""
            ))),
        }
    }
}

/// CPU architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arch {
    #[serde(rename = "i386")]
    I386,
    #[serde(rename = "x86_64")]
    X86_64,
}

impl Arch {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::I386 => "i386",
            Self::X86_64 => "x86_64",
        }
    }
}

impl FromStr for Arch {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "i386" => Ok(Self::I386),
            "x86_64" => Ok(Self::X86_64),
            other => Err(InventoryError::InvalidOperatingSystem(format!(
                "unknown architecture \"{other}\""
            ))),
        }
    }
}

/// Operating system identity: `{ostype, osversion, arch}`
///
/// Stored and exchanged as `"<ostype>-<osversion>-<arch>"`, e.g.
/// `centos-7-x86_64` or `proxmox-61-x86_64`. Each part is validated on its
/// own; whether the combination is bootable is decided by the boot
/// configuration engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OperatingSystem {
    pub os_type: OsType,
    /// Major version (`61` for Proxmox VE 6.1)
    pub version: u32,
    pub arch: Arch,
}

impl OperatingSystem {
    #[must_use]
    pub const fn new(os_type: OsType, version: u32, arch: Arch) -> Self {
        Self { os_type, version, arch }
    }
}

impl Default for OperatingSystem {
    fn default() -> Self {
        Self::new(OsType::Centos, 7, Arch::X86_64)
    }
}

impl FromStr for OperatingSystem {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        let [os_type, version, arch] = parts.as_slice() else {
            return Err(InventoryError::InvalidOperatingSystem(format!(
                "\"{s}\" is not of the form <ostype>-<osversion>-<arch>"
            )));
        };
        let version = version.parse::<u32>().map_err(|_| {
            InventoryError::InvalidOperatingSystem(format!("version \"{version}\" is not numeric"))
        })?;
        Ok(Self::new(os_type.parse()?, version, arch.parse()?))
    }
}

impl TryFrom<String> for OperatingSystem {
    type Error = InventoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OperatingSystem> for String {
    fn from(value: OperatingSystem) -> Self {
        value.to_string()
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.os_type.as_str(), self.version, self.arch.as_str())
    }
}

/// Disk partition scheme used by the Kickstart template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PartitionScheme {
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "docknode")]
    Docknode,
    #[serde(rename = "lcogt")]
    Lcogt,
    #[serde(rename = "prompt")]
    Prompt,
    #[serde(rename = "pubsubdb")]
    Pubsubdb,
    #[default]
    #[serde(rename = "simple")]
    Simple,
    #[serde(rename = "simple-8swap")]
    Simple8Swap,
    #[serde(rename = "simple-8swap-20var")]
    Simple8Swap20Var,
    /// Free-text scheme in `PuppetMachine::partition_scheme_custom`
    #[serde(rename = "custom")]
    Custom,
}

impl PartitionScheme {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Docknode => "docknode",
            Self::Lcogt => "lcogt",
            Self::Prompt => "prompt",
            Self::Pubsubdb => "pubsubdb",
            Self::Simple => "simple",
            Self::Simple8Swap => "simple-8swap",
            Self::Simple8Swap20Var => "simple-8swap-20var",
            Self::Custom => "custom",
        }
    }
}

impl FromStr for PartitionScheme {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "docknode" => Ok(Self::Docknode),
            "lcogt" => Ok(Self::Lcogt),
            "prompt" => Ok(Self::Prompt),
            "pubsubdb" => Ok(Self::Pubsubdb),
            "simple" => Ok(Self::Simple),
            "simple-8swap" => Ok(Self::Simple8Swap),
            "simple-8swap-20var" => Ok(Self::Simple8Swap20Var),
            "custom" => Ok(Self::Custom),
            other => Err(InventoryError::InvalidPartitionScheme(other.to_string())),
        }
    }
}

/// What the machine does at its next network boot
///
/// New machines start in `Rebuild` so they install on first boot. Any state
/// may be set from any other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BootMode {
    /// Boot from local disk
    Local,
    /// Rebuild at next boot
    #[default]
    Rebuild,
    /// Rebuild at next boot from the alternate package mirror
    RebuildAlt,
    /// Rescue at next boot
    Rescue,
}

impl BootMode {
    pub const ALL: [BootMode; 4] = [Self::Local, Self::Rebuild, Self::RebuildAlt, Self::Rescue];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Rebuild => "rebuild",
            Self::RebuildAlt => "rebuildalt",
            Self::Rescue => "rescue",
        }
    }

    /// Any of the "rebuild…" variants
    #[must_use]
    pub fn is_rebuild(&self) -> bool {
        matches!(self, Self::Rebuild | Self::RebuildAlt)
    }

    /// Whether installs should come from the site's alternate mirror
    #[must_use]
    pub fn uses_alternate_mirror(&self) -> bool {
        matches!(self, Self::RebuildAlt)
    }
}

impl FromStr for BootMode {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| InventoryError::InvalidBootMode(s.to_string()))
    }
}

impl fmt::Display for BootMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build lifecycle marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BuildStatus {
    Begin,
    Complete,
}

impl BuildStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Begin => "BEGIN",
            Self::Complete => "COMPLETE",
        }
    }
}

/// A TFTP boot, recorded with the boot mode in effect at the time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BootHistory {
    pub created_at: DateTime<Utc>,
    pub boot_mode: BootMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BuildHistory {
    pub created_at: DateTime<Utc>,
    pub status: BuildStatus,
}

/// Puppet-managed operating system configuration for a device
///
/// History vectors are append-only and kept in chronological order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub struct PuppetMachine {
    #[serde(default)]
    pub operating_system: OperatingSystem,
    #[serde(default)]
    pub partition_scheme: PartitionScheme,
    #[serde(default)]
    pub partition_scheme_custom: String,
    #[serde(default)]
    pub boot_mode: BootMode,
    #[serde(default)]
    pub boot_history: Vec<BootHistory>,
    #[serde(default)]
    pub build_history: Vec<BuildHistory>,
}

impl PuppetMachine {
    #[must_use]
    pub fn last_boot_at(&self) -> Option<DateTime<Utc>> {
        self.boot_history.iter().map(|entry| entry.created_at).max()
    }

    #[must_use]
    pub fn last_build_at(&self) -> Option<DateTime<Utc>> {
        self.build_history.iter().map(|entry| entry.created_at).max()
    }

    /// Boot history, newest first
    pub fn boot_history_newest_first(&self) -> impl Iterator<Item = &BootHistory> {
        self.boot_history.iter().rev()
    }

    /// Build history, newest first
    pub fn build_history_newest_first(&self) -> impl Iterator<Item = &BuildHistory> {
        self.build_history.iter().rev()
    }
}

/// A PXE client that booted without a matching inventory record
///
/// Kept for later promotion to a full NetworkDevice by an operator. The
/// owning site is not stored; it is resolved from `ip_address`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct UnrecognizedPxeDevice {
    #[serde(default)]
    pub id: u64,
    pub mac: MacAddress,
    pub ip_address: Ipv4Addr,
    /// Raw `_Syslinux_*` cookie lines
    #[serde(default)]
    pub data: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configuration(ip: Option<&str>, hostnames: &[&str]) -> AddressConfiguration {
        AddressConfiguration {
            ip_address: ip.map(|ip| ip.parse().unwrap()),
            hostnames: hostnames.iter().map(ToString::to_string).collect(),
        }
    }

    fn interface(mac: &str, configurations: Vec<AddressConfiguration>) -> NetworkInterface {
        NetworkInterface {
            description: String::new(),
            mac: mac.parse().unwrap(),
            configurations,
        }
    }

    fn device(interfaces: Vec<NetworkInterface>) -> NetworkDevice {
        NetworkDevice {
            id: 7,
            site_id: 1,
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

    #[test]
    fn test_operating_system_round_trip() {
        let os: OperatingSystem = "proxmox-61-x86_64".parse().unwrap();
        assert_eq!(os, OperatingSystem::new(OsType::Proxmox, 61, Arch::X86_64));
        assert_eq!(os.to_string(), "proxmox-61-x86_64");
    }

    #[test]
    fn test_operating_system_rejects_bad_parts() {
        assert!("windows-10-x86_64".parse::<OperatingSystem>().is_err());
        assert!("centos-seven-x86_64".parse::<OperatingSystem>().is_err());
        assert!("centos-7-arm64".parse::<OperatingSystem>().is_err());
        assert!("centos-7".parse::<OperatingSystem>().is_err());
    }

    #[test]
    fn test_boot_mode_parse_lists_choices() {
        assert_eq!("rebuildalt".parse::<BootMode>().unwrap(), BootMode::RebuildAlt);
        let err = "reinstall".parse::<BootMode>().unwrap_err();
        assert!(err.to_string().contains("local,rebuild,rebuildalt,rescue"));
    }

    #[test]
    fn test_new_machines_rebuild_on_first_boot() {
        assert_eq!(PuppetMachine::default().boot_mode, BootMode::Rebuild);
    }

    #[test]
    fn test_partition_scheme_names() {
        for name in ["simple-8swap", "simple-8swap-20var", "custom"] {
            let scheme: PartitionScheme = name.parse().unwrap();
            assert_eq!(scheme.as_str(), name);
            assert_eq!(serde_json::to_string(&scheme).unwrap(), format!("\"{name}\""));
        }
    }

    #[test]
    fn test_primary_lookups_follow_stored_order() {
        let device = device(vec![
            interface("aa:bb:cc:dd:ee:01", vec![]),
            interface(
                "aa:bb:cc:dd:ee:02",
                vec![
                    configuration(Some("10.5.0.10"), &["web1.lsc.lco.gtn", "www.lsc.lco.gtn"]),
                    configuration(Some("10.5.0.11"), &["web1b.lsc.lco.gtn"]),
                ],
            ),
        ]);

        assert_eq!(device.primary_mac().unwrap().to_string(), "aa:bb:cc:dd:ee:01");
        assert_eq!(device.primary_static_ip(), Some("10.5.0.10".parse().unwrap()));
        assert_eq!(device.primary_hostname(), Some("web1.lsc.lco.gtn"));
        assert_eq!(device.hostnames().count(), 3);
    }

    #[test]
    fn test_dhcp_primary_configuration_has_no_static_ip() {
        let device = device(vec![interface(
            "aa:bb:cc:dd:ee:01",
            vec![
                configuration(None, &["dyn.lsc.lco.gtn"]),
                configuration(Some("10.5.0.11"), &["late.lsc.lco.gtn"]),
            ],
        )]);
        assert_eq!(device.primary_static_ip(), None);
    }

    #[test]
    fn test_aliases() {
        let configuration = configuration(Some("10.5.0.10"), &["h1", "h2", "h3"]);
        assert_eq!(configuration.primary_hostname(), Some("h1"));
        assert_eq!(configuration.aliases(), ["h2".to_string(), "h3".to_string()]);
        assert!(AddressConfiguration::default().aliases().is_empty());
    }

    #[test]
    fn test_site_validate_rejects_host_bits() {
        let site = Site {
            id: 1,
            code: "lsc".to_string(),
            short_description: String::new(),
            description: String::new(),
            domain: "lsc.lco.gtn".to_string(),
            network: Ipv4Network::new("10.5.0.1".parse().unwrap(), 16).unwrap(),
            gateway: "10.5.0.254".parse().unwrap(),
            dns_servers: vec![],
            external: ExternalNetwork::default(),
            location: GeoLocation::default(),
            timezone: default_timezone(),
            restart_time: NaiveTime::default(),
            mirror_base: String::new(),
            mirror_base_alt: String::new(),
            ntp_servers: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(matches!(site.validate(), Err(InventoryError::InvalidNetwork(_))));
    }
}
