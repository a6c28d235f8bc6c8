//! Request origin
//!
//! Diagnostic and test traffic marks itself with an `internal` query
//! parameter. Such requests read state but never write history.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestOrigin {
    /// A machine actually booting or installing
    #[default]
    External,
    /// Operator diagnostics or tests
    Internal,
}

impl RequestOrigin {
    /// Origin from a raw query string (`a=1&internal`); the presence of the
    /// `internal` key is enough, whatever its value
    pub fn from_query(query: &str) -> Self {
        let internal = query
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .any(|pair| {
                let key = pair.split_once('=').map_or(pair, |(key, _)| key);
                urlencoding::decode(key).is_ok_and(|key| key == "internal")
            });
        Self::from_flag(internal)
    }

    pub fn from_flag(internal: bool) -> Self {
        if internal { Self::Internal } else { Self::External }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}
