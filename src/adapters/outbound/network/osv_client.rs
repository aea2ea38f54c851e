use super::osv_schema::OsvRecord;
use super::{http_client, settings_from};
use crate::ports::outbound::{SourceAdapter, SourceInfo};
use crate::shared::Result;
use crate::vex_generation::domain::{Component, EcoSystem, Vulnerability};
use async_trait::async_trait;
use dashmap::DashMap;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::time::Duration;

static OSV_INFO: SourceInfo = SourceInfo {
    name: "OSV",
    description: "A distributed vulnerability database for open source, aggregating advisories \
                  from ecosystem databases such as GitHub, PyPA, RustSec and Go in the OSV schema.",
    url: "https://osv.dev/",
    ecosystems: &[
        EcoSystem::Cargo,
        EcoSystem::CocoaPods,
        EcoSystem::Composer,
        EcoSystem::Conan,
        EcoSystem::Conda,
        EcoSystem::Cran,
        EcoSystem::Go,
        EcoSystem::Maven,
        EcoSystem::Npm,
        EcoSystem::NuGet,
        EcoSystem::PyPi,
        EcoSystem::Rpm,
        EcoSystem::RubyGems,
        EcoSystem::Swift,
    ],
};

/// Settings read from the `osv` entry of the configuration file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OsvSettings {
    /// Maximum number of advisory detail requests in flight
    pub concurrency: usize,
}

impl Default for OsvSettings {
    fn default() -> Self {
        Self { concurrency: 8 }
    }
}

/// OSV API client
///
/// Two-phase protocol: one batch query returns advisory IDs per package,
/// then each unique ID is fetched from the detail endpoint.
///
/// # Security
/// - Implements timeout (30 seconds by default)
/// - Bounds concurrent detail requests
/// - Does not retry failed requests
#[derive(Debug)]
pub struct OsvClient {
    client: reqwest::Client,
    batch_url: String,
    vulns_url: String,
    concurrency: usize,
}

impl OsvClient {
    const BATCH_ENDPOINT: &'static str = "https://api.osv.dev/v1/querybatch";
    const VULNS_ENDPOINT: &'static str = "https://api.osv.dev/v1/vulns";
    const MAX_BATCH_SIZE: usize = 1000;

    pub fn new(settings: &serde_yaml_ng::Value, timeout: Duration) -> Result<Self> {
        let settings: OsvSettings = settings_from(settings, OSV_INFO.name)?;
        Ok(Self {
            client: http_client(timeout)?,
            batch_url: Self::BATCH_ENDPOINT.to_string(),
            vulns_url: Self::VULNS_ENDPOINT.to_string(),
            concurrency: settings.concurrency.max(1),
        })
    }

    /// Phase 1: advisory IDs for each component, positionally aligned
    async fn fetch_batch(&self, components: &[&Component]) -> Result<Vec<Vec<String>>> {
        let queries: Vec<OsvQuery> = components
            .iter()
            .filter_map(|c| c.purl())
            .map(|purl| OsvQuery {
                package: OsvPackageQuery {
                    name: purl.name().to_string(),
                    purl: purl.to_string(),
                },
            })
            .collect();

        let response = self
            .client
            .post(&self.batch_url)
            .json(&OsvBatchQuery { queries })
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("OSV API returned status code {}", response.status());
        }

        let batch: OsvBatchResponse = response.json().await?;
        if batch.results.len() != components.len() {
            anyhow::bail!(
                "OSV API returned {} results for {} queries",
                batch.results.len(),
                components.len()
            );
        }

        Ok(batch
            .results
            .into_iter()
            .map(|r| r.vulns.into_iter().map(|v| v.id).collect())
            .collect())
    }

    /// Phase 2: full record for one advisory ID
    async fn fetch_vulnerability_details(&self, vuln_id: &str) -> Result<OsvRecord> {
        let url = format!(
            "{}/{}",
            self.vulns_url,
            urlencoding::encode(vuln_id)
        );
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!(
                "OSV API returned status code {} for vulnerability {}",
                response.status(),
                vuln_id
            );
        }

        Ok(response.json().await?)
    }

    /// Fetches every unique ID once, bounded by `concurrency`
    async fn fetch_all_details(&self, ids: Vec<String>) -> Result<DashMap<String, OsvRecord>> {
        let details = DashMap::new();

        let outcomes: Vec<Result<()>> = stream::iter(ids)
            .map(|id| {
                let details = &details;
                async move {
                    let record = self.fetch_vulnerability_details(&id).await?;
                    details.insert(id, record);
                    Ok::<_, anyhow::Error>(())
                }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        outcomes.into_iter().collect::<Result<Vec<()>>>()?;
        Ok(details)
    }
}

#[async_trait]
impl SourceAdapter for OsvClient {
    fn info(&self) -> &SourceInfo {
        &OSV_INFO
    }

    async fn query(&self, eligible: &[&Component]) -> Result<Vec<Vulnerability>> {
        let mut ids_per_component: Vec<(&Component, Vec<String>)> = Vec::new();
        for chunk in eligible.chunks(Self::MAX_BATCH_SIZE) {
            let ids = self.fetch_batch(chunk).await?;
            ids_per_component.extend(chunk.iter().copied().zip(ids));
        }

        let mut unique_ids: Vec<String> = ids_per_component
            .iter()
            .flat_map(|(_, ids)| ids.iter().cloned())
            .collect();
        unique_ids.sort();
        unique_ids.dedup();
        tracing::debug!(
            components = eligible.len(),
            advisories = unique_ids.len(),
            "OSV batch query complete"
        );

        let details = self.fetch_all_details(unique_ids).await?;

        let source = OSV_INFO.as_source();
        let mut vulnerabilities = Vec::new();
        for (component, ids) in ids_per_component {
            let Some(purl) = component.purl() else {
                continue;
            };
            for id in ids {
                if let Some(record) = details.get(&id) {
                    vulnerabilities.push(record.normalize(component, purl.as_str(), &source));
                }
            }
        }

        Ok(vulnerabilities)
    }
}

// OSV API request/response structures

#[derive(Debug, Serialize)]
struct OsvBatchQuery {
    queries: Vec<OsvQuery>,
}

#[derive(Debug, Serialize)]
struct OsvQuery {
    package: OsvPackageQuery,
}

#[derive(Debug, Serialize)]
struct OsvPackageQuery {
    name: String,
    purl: String,
}

#[derive(Debug, Deserialize)]
struct OsvBatchResponse {
    #[serde(default)]
    results: Vec<OsvBatchResult>,
}

#[derive(Debug, Deserialize)]
struct OsvBatchResult {
    #[serde(default)]
    vulns: Vec<OsvVulnId>,
}

#[derive(Debug, Deserialize)]
struct OsvVulnId {
    id: String,
}
