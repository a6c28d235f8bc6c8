//! Per-site installer passwords
//!
//! Root and engineering passwords are derived from the site code and hashed
//! with the crypt(3) scheme the release's installer understands. Every call
//! uses a fresh salt.

use crate::config::CredentialsConfig;
use crate::error::{PxeError, Result};
use crate::platform::CentosRelease;
use serde::Serialize;

/// crypt(3) hash scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashScheme {
    /// `$1$`, the only scheme CentOS 5 Anaconda accepts
    Md5,
    /// `$6$`
    Sha512,
}

impl HashScheme {
    pub fn for_release(release: CentosRelease) -> Self {
        match release {
            CentosRelease::V5 => Self::Md5,
            _ => Self::Sha512,
        }
    }

    pub fn hash(&self, password: &str) -> Result<String> {
        let hashed = match self {
            #[allow(deprecated, reason = "CentOS 5 Anaconda only accepts $1$ hashes")]
            Self::Md5 => pwhash::md5_crypt::hash(password),
            Self::Sha512 => pwhash::sha512_crypt::hash(password),
        };
        hashed.map_err(|e| PxeError::Credentials(e.to_string()))
    }
}

/// Plaintext passwords for a site; never serialized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePasswords {
    pub root: String,
    pub eng: String,
}

impl SitePasswords {
    pub fn for_site(site_code: &str, config: &CredentialsConfig) -> Self {
        Self {
            root: format!("{site_code}{}", config.root_suffix),
            eng: format!("{site_code}{}", config.eng_suffix),
        }
    }
}

/// Hashed passwords as rendered into a Kickstart file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CryptPasswords {
    pub root: String,
    pub eng: String,
}

impl CryptPasswords {
    pub fn hash(passwords: &SitePasswords, scheme: HashScheme) -> Result<Self> {
        Ok(Self {
            root: scheme.hash(&passwords.root)?,
            eng: scheme.hash(&passwords.eng)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_passwords() {
        let passwords = SitePasswords::for_site("lsc", &CredentialsConfig::default());
        assert_eq!(passwords.root, "lsccana1");
        assert_eq!(passwords.eng, "lsctoo1");
    }

    #[test]
    fn test_scheme_per_release() {
        assert_eq!(HashScheme::for_release(CentosRelease::V5), HashScheme::Md5);
        for release in [CentosRelease::V6, CentosRelease::V7, CentosRelease::V8] {
            assert_eq!(HashScheme::for_release(release), HashScheme::Sha512);
        }
    }

    #[test]
    fn test_hashes_verify_with_fresh_salt() {
        let passwords = SitePasswords::for_site("lsc", &CredentialsConfig::default());
        for (scheme, prefix) in [(HashScheme::Md5, "$1$"), (HashScheme::Sha512, "$6$")] {
            let first = CryptPasswords::hash(&passwords, scheme).unwrap();
            let second = CryptPasswords::hash(&passwords, scheme).unwrap();
            assert!(first.root.starts_with(prefix));
            assert_ne!(first.root, second.root);
            assert!(pwhash::unix::verify("lsccana1", &first.root));
            assert!(pwhash::unix::verify("lsctoo1", &second.eng));
            assert!(!pwhash::unix::verify("lsctoo1", &first.root));
        }
    }
}
