//! Package mirror selection

use crate::config::MirrorConfig;
use crate::error::{PxeError, Result};
use inventory::{BootMode, Site};
use regex::Regex;
use tracing::debug;

/// Chooses the package mirror a machine installs from
#[derive(Debug, Clone)]
pub struct MirrorPolicy {
    central_url: String,
    exempt_sites: Vec<String>,
    core_node: Regex,
}

impl MirrorPolicy {
    pub fn new(config: &MirrorConfig) -> Result<Self> {
        let core_node = Regex::new(&config.core_node_pattern).map_err(|e| {
            PxeError::Configuration(format!("invalid core node pattern {:?}: {e}", config.core_node_pattern))
        })?;
        Ok(Self {
            central_url: config.central_url.clone(),
            exempt_sites: config.exempt_sites.clone(),
            core_node,
        })
    }

    /// Mirror base URL, first match wins:
    ///
    /// 1. the alternate site mirror for boot modes that ask for it
    /// 2. the central repository for core nodes, which host the site mirror
    /// 3. the central repository for sites without a local mirror
    /// 4. the site mirror
    pub fn select<'a>(&'a self, site: &'a Site, hostname: Option<&str>, boot_mode: BootMode) -> &'a str {
        if boot_mode.uses_alternate_mirror() {
            debug!("Using alternate mirror for site {}", site.code);
            return &site.mirror_base_alt;
        }
        if hostname.is_some_and(|hostname| self.core_node.is_match(hostname)) {
            debug!("Using central mirror for core node {:?}", hostname);
            return &self.central_url;
        }
        if self.exempt_sites.iter().any(|code| code == &site.code) {
            debug!("Using central mirror for exempt site {}", site.code);
            return &self.central_url;
        }
        &site.mirror_base
    }
}
