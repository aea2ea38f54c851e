use super::{http_client, settings_from};
use crate::ports::outbound::{SourceAdapter, SourceInfo};
use crate::shared::Result;
use crate::vex_generation::domain::{
    AffectedStatus, AffectedTarget, Component, EcoSystem, Purl, VersionSpec, Vulnerability,
    VulnerabilityReference, VulnerabilitySource,
};
use crate::vex_generation::services::{parse_cwe, CvssCalculator};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

static OSS_INDEX_INFO: SourceInfo = SourceInfo {
    name: "OSS Index by Sonatype",
    description: "OSS Index is a free service used by developers to identify open source \
                  dependencies and determine if there are any known, publicly disclosed, \
                  vulnerabilities. OSS Index is based on vulnerability data derived from public \
                  sources and does not include human curated intelligence nor expert remediation \
                  guidance.",
    url: "https://ossindex.sonatype.org/",
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

/// Settings read from the `ossindex` entry of the configuration file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OssIndexSettings {
    pub username: Option<String>,
    pub token: Option<String>,
    /// Coordinates per component-report request
    pub batch_size: usize,
}

impl Default for OssIndexSettings {
    fn default() -> Self {
        Self {
            username: None,
            token: None,
            batch_size: 128,
        }
    }
}

/// OSS Index API client
///
/// Sends every eligible purl to the component-report endpoint in batches and
/// reports each finding against a single version with unknown status.
pub struct OssIndexClient {
    client: reqwest::Client,
    api_url: String,
    credentials: Option<(String, String)>,
    batch_size: usize,
}

impl OssIndexClient {
    const API_ENDPOINT: &'static str = "https://ossindex.sonatype.org/api/v3/component-report";
    const MAX_BATCH_SIZE: usize = 128;

    pub fn new(settings: &serde_yaml_ng::Value, timeout: Duration) -> Result<Self> {
        let settings: OssIndexSettings = settings_from(settings, OSS_INDEX_INFO.name)?;
        let credentials = match (settings.username, settings.token) {
            (Some(username), Some(token)) => Some((username, token)),
            (None, None) => None,
            _ => anyhow::bail!(
                "OSS Index settings need both 'username' and 'token' for authentication"
            ),
        };

        Ok(Self {
            client: http_client(timeout)?,
            api_url: Self::API_ENDPOINT.to_string(),
            credentials,
            batch_size: settings.batch_size.clamp(1, Self::MAX_BATCH_SIZE),
        })
    }

    async fn fetch_reports(&self, coordinates: Vec<String>) -> Result<Vec<ComponentReport>> {
        let mut request = self
            .client
            .post(&self.api_url)
            .json(&ComponentReportRequest { coordinates });
        if let Some((username, token)) = &self.credentials {
            request = request.basic_auth(username, Some(token));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            anyhow::bail!("OSS Index API returned status code {}", response.status());
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl SourceAdapter for OssIndexClient {
    fn info(&self) -> &SourceInfo {
        &OSS_INDEX_INFO
    }

    async fn query(&self, eligible: &[&Component]) -> Result<Vec<Vulnerability>> {
        let by_coordinates: HashMap<String, &Component> = eligible
            .iter()
            .filter_map(|c| c.purl().map(|p| (p.to_string(), *c)))
            .collect();

        let mut vulnerabilities = Vec::new();
        for chunk in eligible.chunks(self.batch_size) {
            let coordinates: Vec<String> = chunk
                .iter()
                .filter_map(|c| c.purl().map(|p| p.to_string()))
                .collect();

            for report in self.fetch_reports(coordinates).await? {
                let component = by_coordinates.get(&report.coordinates).copied();
                vulnerabilities.extend(report.normalize(component));
            }
        }

        tracing::debug!(
            components = eligible.len(),
            findings = vulnerabilities.len(),
            "OSS Index component report complete"
        );
        Ok(vulnerabilities)
    }
}

// OSS Index API request/response structures

#[derive(Debug, Serialize)]
struct ComponentReportRequest {
    coordinates: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ComponentReport {
    coordinates: String,
    #[serde(default)]
    vulnerabilities: Vec<ReportedVulnerability>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportedVulnerability {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    cvss_score: Option<f64>,
    #[serde(default)]
    cvss_vector: Option<String>,
    #[serde(default)]
    cwe: Option<String>,
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    external_references: Vec<String>,
}

impl ComponentReport {
    /// One record per finding, targeting the queried component
    ///
    /// A coordinate the service rewrote (and so matches no queried component)
    /// is used as the reference itself.
    fn normalize(self, component: Option<&Component>) -> Vec<Vulnerability> {
        let purl = component.and_then(Component::purl);
        let reference = purl
            .map(|p| p.to_string())
            .unwrap_or_else(|| self.coordinates.clone());
        let version = purl
            .and_then(Purl::version)
            .map(str::to_string)
            .or_else(|| {
                Purl::parse(&self.coordinates)
                    .ok()
                    .and_then(|p| p.version().map(str::to_string))
            });

        self.vulnerabilities
            .into_iter()
            .map(|finding| finding.normalize(&reference, version.as_deref()))
            .collect()
    }
}

impl ReportedVulnerability {
    fn normalize(self, reference: &str, version: Option<&str>) -> Vulnerability {
        let finding_source = VulnerabilitySource::new(OSS_INDEX_INFO.name, self.reference.clone());

        let mut vulnerability = Vulnerability::new(Some(self.id.clone()), OSS_INDEX_INFO.as_source());
        vulnerability.references.push(VulnerabilityReference {
            id: self.id,
            source: finding_source.clone(),
        });

        let vector = self.cvss_vector.as_deref().filter(|v| !v.trim().is_empty());
        // A score of 0.0 means the finding is unscored
        match (self.cvss_score, vector) {
            (Some(score), vector) if score > 0.0 => vulnerability.ratings.push(
                CvssCalculator::rating_from_score(score, vector, Some(finding_source)),
            ),
            (None, Some(vector)) => vulnerability
                .ratings
                .push(CvssCalculator::rating_from_vector(vector, Some(finding_source))),
            _ => {}
        }

        vulnerability.cwes = self.cwe.as_deref().and_then(parse_cwe).into_iter().collect();
        vulnerability.description = self.title;
        vulnerability.detail = self.description;
        vulnerability.advisories = self.external_references;

        let mut target = AffectedTarget::new(reference);
        if let Some(version) = version {
            target = target.with_version(VersionSpec::Version {
                version: version.to_string(),
                status: AffectedStatus::Unknown,
            });
        }
        vulnerability.affects.push(target);

        vulnerability
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_server::{Route, StubServer};
    use super::*;
    use crate::vex_generation::domain::{ScoreMethod, Severity};

    const REPORT: &str = r#"[{
        "coordinates": "pkg:pypi/flask@0.12",
        "description": "A simple framework for building complex web applications.",
        "reference": "https://ossindex.sonatype.org/component/pkg:pypi/flask@0.12",
        "vulnerabilities": [
            {
                "id": "CVE-2018-1000656",
                "displayName": "CVE-2018-1000656",
                "title": "[CVE-2018-1000656] Improper Input Validation",
                "description": "The Pallets Project flask version Before 0.12.3 contains a CWE-20 vulnerability.",
                "cvssScore": 7.5,
                "cvssVector": "CVSS:3.0/AV:N/AC:L/PR:N/UI:N/S:U/C:N/I:N/A:H",
                "cwe": "CWE-20",
                "cve": "CVE-2018-1000656",
                "reference": "https://ossindex.sonatype.org/vulnerability/CVE-2018-1000656",
                "externalReferences": [
                    "http://web.nvd.nist.gov/view/vuln/detail?vulnId=CVE-2018-1000656",
                    "https://github.com/pallets/flask/pull/2691"
                ]
            },
            {
                "id": "sonatype-2019-0001",
                "title": "Unscored finding"
            }
        ]
    }]"#;

    fn flask() -> Component {
        Component::builder()
            .name("flask")
            .version("0.12")
            .purl(Purl::parse("pkg:pypi/flask@0.12").unwrap())
            .build()
            .unwrap()
    }

    fn reports() -> Vec<ComponentReport> {
        serde_json::from_str(REPORT).unwrap()
    }

    #[test]
    fn test_normalize_scored_finding() {
        let component = flask();
        let vulns = reports().remove(0).normalize(Some(&component));
        assert_eq!(vulns.len(), 2);

        let vuln = &vulns[0];
        assert_eq!(vuln.id.as_deref(), Some("CVE-2018-1000656"));
        assert_eq!(vuln.source.name, "OSS Index by Sonatype");
        assert_eq!(vuln.cwes, vec![20]);
        assert_eq!(
            vuln.description.as_deref(),
            Some("[CVE-2018-1000656] Improper Input Validation")
        );
        assert!(vuln.detail.as_deref().unwrap().contains("Before 0.12.3"));

        let rating = &vuln.ratings[0];
        assert_eq!(rating.score.map(|s| s.value()), Some(7.5));
        assert_eq!(rating.severity, Some(Severity::High));
        assert_eq!(rating.method, Some(ScoreMethod::CvssV3));
        assert_eq!(
            rating.source.as_ref().and_then(|s| s.url.as_deref()),
            Some("https://ossindex.sonatype.org/vulnerability/CVE-2018-1000656")
        );
    }

    #[test]
    fn test_normalize_copies_external_references() {
        let component = flask();
        let vulns = reports().remove(0).normalize(Some(&component));
        assert_eq!(
            vulns[0].advisories,
            vec![
                "http://web.nvd.nist.gov/view/vuln/detail?vulnId=CVE-2018-1000656".to_string(),
                "https://github.com/pallets/flask/pull/2691".to_string(),
            ]
        );
    }

    #[test]
    fn test_normalize_single_version_unknown_status() {
        let component = flask();
        let vulns = reports().remove(0).normalize(Some(&component));
        let target = &vulns[0].affects[0];
        assert_eq!(target.reference, "pkg:pypi/flask@0.12");
        assert_eq!(
            target.versions,
            vec![VersionSpec::Version {
                version: "0.12".to_string(),
                status: AffectedStatus::Unknown
            }]
        );
    }

    #[test]
    fn test_normalize_missing_optional_fields() {
        let component = flask();
        let vulns = reports().remove(0).normalize(Some(&component));
        let vuln = &vulns[1];
        assert!(vuln.ratings.is_empty());
        assert!(vuln.cwes.is_empty());
        assert!(vuln.advisories.is_empty());
        assert!(vuln.detail.is_none());
    }

    #[test]
    fn test_normalize_unmatched_coordinates() {
        let vulns = reports().remove(0).normalize(None);
        assert_eq!(vulns[0].affects[0].reference, "pkg:pypi/flask@0.12");
        assert_eq!(vulns[0].affects[0].versions.len(), 1);
    }

    #[test]
    fn test_normalize_zero_score_is_unscored() {
        let reports: Vec<ComponentReport> = serde_json::from_str(
            r#"[{"coordinates": "pkg:pypi/flask@0.12", "vulnerabilities": [{
                "id": "sonatype-2020-0002",
                "title": "Zero score",
                "cvssScore": 0.0,
                "cvssVector": "CVSS:3.0/AV:N/AC:L/PR:N/UI:N/S:U/C:N/I:N/A:N"
            }]}]"#,
        )
        .unwrap();
        let component = flask();
        let vulns = reports.into_iter().next().unwrap().normalize(Some(&component));
        assert!(vulns[0].ratings.is_empty());
    }

    fn left_pad() -> Component {
        Component::builder()
            .name("left-pad")
            .version("1.0.0")
            .purl(Purl::parse("pkg:npm/left-pad@1.0.0").unwrap())
            .build()
            .unwrap()
    }

    async fn stub_client(routes: Vec<Route>, batch_size: usize) -> (StubServer, OssIndexClient) {
        let server = StubServer::start(routes).await;
        let client = OssIndexClient {
            api_url: server.url("/api/v3/component-report"),
            batch_size,
            ..OssIndexClient::new(&serde_yaml_ng::Value::Null, Duration::from_secs(5)).unwrap()
        };
        (server, client)
    }

    #[tokio::test]
    async fn test_query_matches_reports_by_coordinates() {
        let body = r#"[
            {"coordinates": "pkg:npm/left-pad@1.0.0", "vulnerabilities": [
                {"id": "sonatype-2016-0001", "title": "Removed from registry", "cvssScore": 5.3}
            ]},
            {"coordinates": "pkg:pypi/flask@0.12", "vulnerabilities": [
                {"id": "CVE-2018-1000656", "cvssScore": 7.5}
            ]},
            {"coordinates": "pkg:pypi/flask@0.12.0", "vulnerabilities": [
                {"id": "CVE-2019-1010083"}
            ]}
        ]"#;
        let (server, client) =
            stub_client(vec![Route::post("/api/v3/component-report", 200, body)], 128).await;
        let (flask, left_pad) = (flask(), left_pad());

        let vulns = client.query(&[&flask, &left_pad]).await.unwrap();

        let found: Vec<(&str, &str)> = vulns
            .iter()
            .map(|v| (v.id.as_deref().unwrap(), v.affects[0].reference.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("sonatype-2016-0001", "pkg:npm/left-pad@1.0.0"),
                ("CVE-2018-1000656", "pkg:pypi/flask@0.12"),
                ("CVE-2019-1010083", "pkg:pypi/flask@0.12.0"),
            ]
        );
        assert_eq!(server.hits("POST", "/api/v3/component-report"), 1);

        let request: serde_json::Value = serde_json::from_str(&server.requests()[0].body).unwrap();
        assert_eq!(
            request,
            serde_json::json!({"coordinates": ["pkg:pypi/flask@0.12", "pkg:npm/left-pad@1.0.0"]})
        );
    }

    #[tokio::test]
    async fn test_query_sends_one_request_per_batch() {
        let (server, client) =
            stub_client(vec![Route::post("/api/v3/component-report", 200, "[]")], 1).await;
        let (flask, left_pad) = (flask(), left_pad());

        let vulns = client.query(&[&flask, &left_pad]).await.unwrap();

        assert!(vulns.is_empty());
        let bodies: Vec<String> = server.requests().into_iter().map(|r| r.body).collect();
        assert_eq!(
            bodies,
            vec![
                r#"{"coordinates":["pkg:pypi/flask@0.12"]}"#.to_string(),
                r#"{"coordinates":["pkg:npm/left-pad@1.0.0"]}"#.to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_query_error_status() {
        let (_server, client) =
            stub_client(vec![Route::post("/api/v3/component-report", 401, "{}")], 128).await;
        let flask = flask();

        let err = client.query(&[&flask]).await.unwrap_err();
        assert!(err.to_string().contains("status code 401"));
    }

    #[test]
    fn test_client_settings() {
        let settings: serde_yaml_ng::Value =
            serde_yaml_ng::from_str("username: me\ntoken: secret\nbatch_size: 500").unwrap();
        let client = OssIndexClient::new(&settings, Duration::from_secs(30)).unwrap();
        assert_eq!(client.batch_size, 128);
        assert!(client.credentials.is_some());
        assert_eq!(client.info().name, "OSS Index by Sonatype");
    }

    #[test]
    fn test_client_rejects_partial_credentials() {
        let settings: serde_yaml_ng::Value = serde_yaml_ng::from_str("username: me").unwrap();
        assert!(OssIndexClient::new(&settings, Duration::from_secs(30)).is_err());
    }

    #[test]
    fn test_request_serialize() {
        let request = ComponentReportRequest {
            coordinates: vec!["pkg:pypi/flask@0.12".to_string()],
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"coordinates":["pkg:pypi/flask@0.12"]}"#
        );
    }
}
