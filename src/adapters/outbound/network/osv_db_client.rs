use super::osv_schema::OsvRecord;
use super::{http_client, settings_from};
use crate::ports::outbound::{SourceAdapter, SourceInfo};
use crate::shared::Result;
use crate::vex_generation::domain::{Component, EcoSystem, Vulnerability};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

static OSV_DB_INFO: SourceInfo = SourceInfo {
    name: "OSV DB",
    description: "An open, precise, and distributed approach to producing and consuming \
                  vulnerability information for open source.",
    url: "http://127.0.0.1:8888/",
    ecosystems: &[EcoSystem::Debian],
};

/// Settings read from the `osvdb` entry of the configuration file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OsvDbSettings {
    /// Base URL of the local OSV mirror
    pub url: String,
}

impl Default for OsvDbSettings {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8888".to_string(),
        }
    }
}

/// Client for a self-hosted OSV database mirror
///
/// Queries one purl per request and receives full OSV records directly.
#[derive(Debug)]
pub struct OsvDbClient {
    client: reqwest::Client,
    query_url: String,
}

impl OsvDbClient {
    pub fn new(settings: &serde_yaml_ng::Value, timeout: Duration) -> Result<Self> {
        let settings: OsvDbSettings = settings_from(settings, OSV_DB_INFO.name)?;
        Ok(Self {
            client: http_client(timeout)?,
            query_url: format!("{}/api/v1/query", settings.url.trim_end_matches('/')),
        })
    }

    async fn fetch_records(&self, purl: &str) -> Result<Vec<OsvRecord>> {
        let response = self
            .client
            .post(&self.query_url)
            .json(&OsvDbQuery { purl })
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!(
                "OSV DB returned status code {} for {}",
                response.status(),
                purl
            );
        }

        let body: OsvDbResponse = response.json().await?;
        Ok(body.results)
    }
}

#[async_trait]
impl SourceAdapter for OsvDbClient {
    fn info(&self) -> &SourceInfo {
        &OSV_DB_INFO
    }

    async fn query(&self, eligible: &[&Component]) -> Result<Vec<Vulnerability>> {
        let source = OSV_DB_INFO.as_source();
        let mut vulnerabilities = Vec::new();

        for component in eligible {
            let Some(purl) = component.purl() else {
                continue;
            };
            let records = self.fetch_records(purl.as_str()).await?;
            tracing::debug!(purl = %purl, records = records.len(), "OSV DB query complete");
            vulnerabilities.extend(
                records
                    .iter()
                    .map(|record| record.normalize(component, purl.as_str(), &source)),
            );
        }

        Ok(vulnerabilities)
    }
}

#[derive(Debug, Serialize)]
struct OsvDbQuery<'a> {
    purl: &'a str,
}

#[derive(Debug, Deserialize)]
struct OsvDbResponse {
    #[serde(default)]
    results: Vec<OsvRecord>,
}
