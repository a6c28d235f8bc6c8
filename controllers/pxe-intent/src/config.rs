//! Controller configuration from environment variables.

use crate::error::ControllerError;
use inventory::puppetdb::DEFAULT_PUPPETDB_URL;
use pxe_config::PxeConfig;
use std::env;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Inventory snapshot the commands run against
    pub inventory_snapshot: PathBuf,
    pub puppetdb_url: String,
    /// Base of the TFTP, Kickstart and boot-mode URLs handed to installers
    pub public_base_url: String,
    pub pxe: PxeConfig,
}

impl ControllerConfig {
    pub fn from_env() -> Result<Self, ControllerError> {
        let inventory_snapshot = env::var("INVENTORY_SNAPSHOT").map(PathBuf::from).map_err(|_| {
            ControllerError::InvalidConfig("INVENTORY_SNAPSHOT environment variable is required".to_string())
        })?;
        let puppetdb_url = env::var("PUPPETDB_URL").unwrap_or_else(|_| DEFAULT_PUPPETDB_URL.to_string());
        let public_base_url = env::var("PUBLIC_BASE_URL").unwrap_or_default();
        let pxe_config_path = env::var("PXE_CONFIG").ok();

        let pxe = match &pxe_config_path {
            Some(path) => PxeConfig::from_file(path)
                .map_err(|e| ControllerError::InvalidConfig(format!("{path}: {e}")))?,
            None => PxeConfig::default(),
        };

        info!("Configuration:");
        info!("  Inventory snapshot: {}", inventory_snapshot.display());
        info!("  PuppetDB URL: {}", puppetdb_url);
        info!(
            "  Public base URL: {}",
            if public_base_url.is_empty() { "(relative)" } else { public_base_url.as_str() }
        );
        info!("  PXE config: {}", pxe_config_path.as_deref().unwrap_or("built-in defaults"));

        Ok(Self {
            inventory_snapshot,
            puppetdb_url,
            public_base_url,
            pxe,
        })
    }
}
