//! Inventory graph
//!
//! Typed models for sites, network devices, interfaces, address
//! configurations, Puppet machines and webcams, together with a store trait,
//! an in-memory implementation of it and a PuppetDB fact client.
//!
//! # Example
//!
//! ```no_run
//! use inventory::{InventoryStore, MacAddress, MemoryStore};
//!
//! # async fn example(store: MemoryStore) -> Result<(), Box<dyn std::error::Error>> {
//! let mac: MacAddress = "52-54-00-E3-CC-00".parse()?;
//! if let Some(device) = store.get_device_by_mac(&mac).await? {
//!     println!("{:?} boots as {:?}", device.primary_hostname(), device.puppet_machine()?.boot_mode);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod mac;
pub mod memory;
pub mod models;
pub mod puppetdb;
pub mod site_index;
pub mod store;
#[cfg(any(test, feature = "test-util"))]
pub mod fixtures;

pub use error::InventoryError;
pub use mac::MacAddress;
pub use memory::MemoryStore;
pub use models::*;
pub use puppetdb::{Fact, PuppetDbClient};
pub use site_index::SiteIndex;
pub use store::{InventoryStore, PuppetMachineTransition, PuppetMachineUpdate};
