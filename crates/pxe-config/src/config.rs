//! Boot configuration policy
//!
//! Every field has a default, so an empty YAML document is a valid
//! configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CENTRAL_MIRROR: &str = "http://packagerepo.lco.gtn/repos";
pub const DEFAULT_CORE_NODE_PATTERN: &str = r"^core\d.*\.lco\.gtn$";
pub const DEFAULT_EXEMPT_SITES: [&str; 6] = ["bpl", "mfg", "sba", "sci", "wer", "wtf"];
pub const DEFAULT_LEGACY_TEXT_MODE_PREFIX: &str = "fs.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PxeConfig {
    pub mirror: MirrorConfig,
    pub credentials: CredentialsConfig,
    /// Hostname prefix of hardware that needs the text-mode installer
    pub legacy_text_mode_prefix: String,
}

impl Default for PxeConfig {
    fn default() -> Self {
        Self {
            mirror: MirrorConfig::default(),
            credentials: CredentialsConfig::default(),
            legacy_text_mode_prefix: DEFAULT_LEGACY_TEXT_MODE_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    pub central_url: String,
    /// Site codes without a local mirror
    pub exempt_sites: Vec<String>,
    pub core_node_pattern: String,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            central_url: DEFAULT_CENTRAL_MIRROR.to_string(),
            exempt_sites: DEFAULT_EXEMPT_SITES.iter().map(ToString::to_string).collect(),
            core_node_pattern: DEFAULT_CORE_NODE_PATTERN.to_string(),
        }
    }
}

/// Suffixes appended to the site code to form the installer passwords
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub root_suffix: String,
    pub eng_suffix: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            root_suffix: "cana1".to_string(),
            eng_suffix: "too1".to_string(),
        }
    }
}

impl PxeConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}
