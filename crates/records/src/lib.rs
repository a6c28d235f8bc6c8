//! Record derivation
//!
//! Pure functions from a snapshot of the inventory graph to the records
//! other systems consume: DNS records and zone serials, DHCP reservations,
//! BIND/hosts rows and per-site dashboard aggregates. Given identical
//! inputs every function returns identical output.

pub mod dashboard;
pub mod dhcp;
pub mod dns;
pub mod error;
pub mod zone;

pub use dashboard::{DashboardData, UnrecognizedDeviceView};
pub use dhcp::{DhcpRange, DhcpRecord};
pub use dns::{DnsRecord, RecordType};
pub use error::RecordError;
