//! PuppetDB fact client
//!
//! Queries the PuppetDB v4 facts endpoint for a single certname. Failures are
//! propagated to the caller unmodified; there is no retry.

use crate::error::InventoryError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default PuppetDB endpoint
pub const DEFAULT_PUPPETDB_URL: &str = "http://puppetdb.lco.gtn:8080";

/// A single fact reported by a Puppet agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fact {
    pub certname: String,
    pub name: String,
    pub value: serde_json::Value,
    #[serde(default)]
    pub environment: Option<String>,
}

/// Find a fact by name
#[must_use]
pub fn find_fact<'a>(facts: &'a [Fact], name: &str) -> Option<&'a serde_json::Value> {
    facts.iter().find(|fact| fact.name == name).map(|fact| &fact.value)
}

/// PuppetDB API client
pub struct PuppetDbClient {
    client: Client,
    base_url: String,
}

impl PuppetDbClient {
    /// Create a new PuppetDB client
    ///
    /// # Arguments
    /// * `base_url` - PuppetDB base URL (e.g., "http://puppetdb.lco.gtn:8080")
    pub fn new(base_url: impl Into<String>) -> Result<Self, InventoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        let base_url: String = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the facts query URL for a certname
    pub fn facts_url(&self, certname: &str) -> Result<String, InventoryError> {
        let query = serde_json::to_string(&["=", "certname", certname])?;
        Ok(format!(
            "{}/pdb/query/v4/facts?query={}",
            self.base_url,
            urlencoding::encode(&query)
        ))
    }

    /// All facts for a certname
    pub async fn facts(&self, certname: &str) -> Result<Vec<Fact>, InventoryError> {
        let url = self.facts_url(certname)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InventoryError::Api(format!(
                "facts query for {certname} failed: {status} - {body}"
            )));
        }

        Ok(response.json().await?)
    }

    /// Value of one named fact, `None` if the agent never reported it
    pub async fn fact_value(
        &self,
        certname: &str,
        name: &str,
    ) -> Result<Option<serde_json::Value>, InventoryError> {
        let facts = self.facts(certname).await?;
        Ok(find_fact(&facts, name).cloned())
    }
}
