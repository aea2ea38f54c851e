//! OSV record wire types, shared by the osv.dev and OSV DB adapters

use crate::vex_generation::domain::{
    AffectedStatus, AffectedTarget, Component, Contact, Credits, Purl, VersionSpec, Vulnerability,
    VulnerabilityReference, VulnerabilitySource,
};
use crate::vex_generation::services::{parse_cwes, CvssCalculator, RangeEvent, VersRange};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Reference types copied to advisories; everything else is dropped
const ADVISORY_REFERENCE_TYPES: [&str; 3] = ["ADVISORY", "ARTICLE", "REPORT"];

/// Severity types that carry a CVSS vector
const CVSS_SEVERITY_TYPES: [&str; 3] = ["CVSS_V2", "CVSS_V3", "CVSS_V4"];

#[derive(Debug, Clone, Deserialize)]
pub struct OsvRecord {
    pub id: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(default)]
    pub severity: Vec<OsvSeverity>,
    #[serde(default)]
    pub affected: Vec<OsvAffected>,
    #[serde(default)]
    pub references: Vec<OsvReference>,
    #[serde(default)]
    pub credits: Vec<OsvCredit>,
    #[serde(default)]
    pub database_specific: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OsvSeverity {
    #[serde(rename = "type")]
    pub severity_type: String,
    pub score: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OsvAffected {
    #[serde(default)]
    pub package: Option<OsvPackage>,
    #[serde(default)]
    pub ranges: Vec<OsvRange>,
    #[serde(default)]
    pub versions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OsvPackage {
    #[serde(default)]
    pub ecosystem: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub purl: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OsvRange {
    #[serde(rename = "type")]
    pub range_type: String,
    #[serde(default)]
    pub events: Vec<OsvEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OsvEvent {
    #[serde(default)]
    pub introduced: Option<String>,
    #[serde(default)]
    pub fixed: Option<String>,
    #[serde(default)]
    pub last_affected: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

impl OsvEvent {
    fn to_range_event(&self) -> Option<RangeEvent> {
        if let Some(v) = &self.introduced {
            Some(RangeEvent::Introduced(v.clone()))
        } else if let Some(v) = &self.fixed {
            Some(RangeEvent::Fixed(v.clone()))
        } else if let Some(v) = &self.last_affected {
            Some(RangeEvent::LastAffected(v.clone()))
        } else {
            self.limit.as_ref().map(|v| RangeEvent::Limit(v.clone()))
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OsvReference {
    #[serde(rename = "type")]
    pub reference_type: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OsvCredit {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub contact: Vec<String>,
}

impl OsvRecord {
    /// Canonical record for one queried component
    ///
    /// `local_ref` becomes the affected-target reference. Missing optional
    /// fields yield absent values, never an error.
    pub fn normalize(
        &self,
        component: &Component,
        local_ref: &str,
        source: &VulnerabilitySource,
    ) -> Vulnerability {
        let mut vulnerability = Vulnerability::new(Some(self.id.clone()), source.clone());

        vulnerability.references = self
            .aliases
            .iter()
            .filter(|alias| alias.starts_with("CVE-"))
            .map(|alias| VulnerabilityReference {
                id: alias.clone(),
                source: VulnerabilitySource::nvd(alias),
            })
            .collect();

        vulnerability.ratings = self
            .severity
            .iter()
            .filter(|s| CVSS_SEVERITY_TYPES.contains(&s.severity_type.as_str()))
            .map(|s| CvssCalculator::rating_from_vector(&s.score, Some(source.clone())))
            .collect();

        vulnerability.cwes = self.cwe_ids();
        vulnerability.description = self.summary.clone();
        vulnerability.detail = self.details.clone();

        vulnerability.advisories = self
            .references
            .iter()
            .filter(|r| ADVISORY_REFERENCE_TYPES.contains(&r.reference_type.as_str()))
            .map(|r| r.url.clone())
            .collect();

        vulnerability.credits = self.credits();
        vulnerability.published = self.published.as_deref().and_then(parse_timestamp);
        vulnerability.updated = self.modified.as_deref().and_then(parse_timestamp);
        vulnerability.affects = vec![self.affected_target(component, local_ref)];

        vulnerability
    }

    fn cwe_ids(&self) -> Vec<u32> {
        let ids = self
            .database_specific
            .as_ref()
            .and_then(|db| db.get("cwe_ids"))
            .and_then(|ids| ids.as_array());

        match ids {
            Some(ids) => parse_cwes(ids.iter().filter_map(|id| id.as_str())),
            None => Vec::new(),
        }
    }

    fn credits(&self) -> Option<Credits> {
        let individuals: Vec<Contact> = self
            .credits
            .iter()
            .filter(|c| c.name.is_some())
            .map(|c| Contact {
                name: c.name.clone(),
                email: c
                    .contact
                    .iter()
                    .find(|value| value.contains('@'))
                    .map(|value| value.trim_start_matches("mailto:").to_string()),
                phone: None,
            })
            .collect();

        if individuals.is_empty() {
            None
        } else {
            Some(Credits { individuals })
        }
    }

    /// One target for the component, built from the affected entries that
    /// describe it (all entries when none match)
    fn affected_target(&self, component: &Component, local_ref: &str) -> AffectedTarget {
        let matching: Vec<&OsvAffected> = self
            .affected
            .iter()
            .filter(|a| a.describes(component))
            .collect();
        let entries: Vec<&OsvAffected> = if matching.is_empty() {
            self.affected.iter().collect()
        } else {
            matching
        };

        let mut target = AffectedTarget::new(local_ref);
        for entry in entries {
            for version in &entry.versions {
                target = target.with_version(VersionSpec::Version {
                    version: version.clone(),
                    status: AffectedStatus::Affected,
                });
            }
            for range in &entry.ranges {
                if let Some(vers) = entry.vers_range(range, component) {
                    target = target.with_version(VersionSpec::Range {
                        range: vers.to_string(),
                        status: AffectedStatus::Affected,
                    });
                }
            }
        }
        target
    }
}

impl OsvAffected {
    fn describes(&self, component: &Component) -> bool {
        let (Some(package), Some(purl)) = (&self.package, component.purl()) else {
            return false;
        };

        if let Some(affected_purl) = package.purl.as_deref().and_then(|p| Purl::parse(p).ok()) {
            return affected_purl.same_package(purl);
        }

        match (&package.name, purl.namespace()) {
            (Some(name), Some(namespace)) => {
                name == purl.name()
                    || *name == format!("{}/{}", namespace, purl.name())
                    || *name == format!("{}:{}", namespace, purl.name())
            }
            (Some(name), None) => name.eq_ignore_ascii_case(purl.name()),
            (None, _) => false,
        }
    }

    /// `SEMVER` ranges use the semver scheme, `ECOSYSTEM` ranges the
    /// component's purl type; `GIT` ranges have no version scheme
    fn vers_range(&self, range: &OsvRange, component: &Component) -> Option<VersRange> {
        let scheme = match range.range_type.as_str() {
            "SEMVER" => "semver".to_string(),
            "ECOSYSTEM" => self.ecosystem_scheme(component)?,
            _ => return None,
        };
        let events: Vec<RangeEvent> = range
            .events
            .iter()
            .filter_map(OsvEvent::to_range_event)
            .collect();
        VersRange::from_events(scheme, &events)
    }

    fn ecosystem_scheme(&self, component: &Component) -> Option<String> {
        if let Some(purl) = component.purl() {
            return Some(purl.ty().to_ascii_lowercase());
        }
        self.package
            .as_ref()
            .and_then(|p| p.ecosystem.as_deref())
            .map(|e| e.to_ascii_lowercase())
    }
}

/// RFC 3339 timestamp; anything unparsable is treated as absent
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vex_generation::domain::{ScoreMethod, Severity};

    const RECORD: &str = r#"{
        "id": "GHSA-562c-5r94-xh97",
        "summary": "Flask is vulnerable to Denial of Service via incorrect encoding of JSON data",
        "details": "The Pallets Project Flask before 1.0 is affected by unexpected memory usage.",
        "aliases": ["CVE-2019-1010083", "PYSEC-2019-179"],
        "published": "2019-07-17T21:24:00Z",
        "modified": "2023-08-29T18:35:02.391Z",
        "severity": [
            {"type": "CVSS_V3", "score": "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:N/I:N/A:H"},
            {"type": "CVSS_V2", "score": "AV:N/AC:L/Au:N/C:N/I:N/A:P"}
        ],
        "affected": [
            {
                "package": {"ecosystem": "PyPI", "name": "flask", "purl": "pkg:pypi/flask"},
                "ranges": [
                    {"type": "ECOSYSTEM", "events": [{"introduced": "0"}, {"fixed": "1.0"}]},
                    {"type": "GIT", "repo": "https://github.com/pallets/flask", "events": [{"introduced": "0"}, {"fixed": "abc123"}]}
                ],
                "versions": ["0.12", "0.12.1"]
            },
            {
                "package": {"ecosystem": "PyPI", "name": "quart"},
                "ranges": [{"type": "SEMVER", "events": [{"introduced": "0"}, {"fixed": "0.5.0"}]}]
            }
        ],
        "references": [
            {"type": "ADVISORY", "url": "https://nvd.nist.gov/vuln/detail/CVE-2019-1010083"},
            {"type": "WEB", "url": "https://www.palletsprojects.com/blog/flask-1-0-released/"},
            {"type": "PACKAGE", "url": "https://github.com/pallets/flask"},
            {"type": "REPORT", "url": "https://github.com/pallets/flask/issues/2691"}
        ],
        "credits": [
            {"name": "Jane Doe", "contact": ["https://example.com/jane", "mailto:jane@example.com"]},
            {"contact": ["anonymous@example.com"]}
        ],
        "database_specific": {"cwe_ids": ["CWE-400", "NVD-CWE-noinfo"], "severity": "HIGH"}
    }"#;

    fn record() -> OsvRecord {
        serde_json::from_str(RECORD).unwrap()
    }

    fn flask() -> Component {
        Component::builder()
            .name("flask")
            .version("0.12")
            .purl(Purl::parse("pkg:pypi/flask@0.12").unwrap())
            .build()
            .unwrap()
    }

    fn osv() -> VulnerabilitySource {
        VulnerabilitySource::new("OSV", Some("https://osv.dev/".to_string()))
    }

    #[test]
    fn test_normalize_identity_and_text() {
        let vuln = record().normalize(&flask(), "pkg:pypi/flask@0.12", &osv());
        assert_eq!(vuln.id.as_deref(), Some("GHSA-562c-5r94-xh97"));
        assert_eq!(vuln.source.name, "OSV");
        assert!(vuln.description.as_deref().unwrap().starts_with("Flask is vulnerable"));
        assert!(vuln.detail.is_some());
        assert!(vuln.published.is_some());
        assert!(vuln.updated.is_some());
    }

    #[test]
    fn test_normalize_promotes_cve_aliases() {
        let vuln = record().normalize(&flask(), "pkg:pypi/flask@0.12", &osv());
        assert_eq!(vuln.references.len(), 1);
        assert_eq!(vuln.references[0].id, "CVE-2019-1010083");
        assert_eq!(
            vuln.references[0].source.name,
            "National Vulnerability Database"
        );
        assert_eq!(
            vuln.references[0].source.url.as_deref(),
            Some("https://nvd.nist.gov/vuln/detail/CVE-2019-1010083")
        );
    }

    #[test]
    fn test_normalize_ratings_from_vectors() {
        let vuln = record().normalize(&flask(), "pkg:pypi/flask@0.12", &osv());
        assert_eq!(vuln.ratings.len(), 2);

        let v3 = &vuln.ratings[0];
        assert_eq!(v3.method, Some(ScoreMethod::CvssV31));
        assert_eq!(v3.score.map(|s| s.value()), Some(7.5));
        assert_eq!(v3.severity, Some(Severity::High));

        let v2 = &vuln.ratings[1];
        assert_eq!(v2.method, Some(ScoreMethod::CvssV2));
        assert!(v2.score.is_none());
        assert!(v2.severity.is_none());
    }

    #[test]
    fn test_normalize_cwes_and_advisories() {
        let vuln = record().normalize(&flask(), "pkg:pypi/flask@0.12", &osv());
        assert_eq!(vuln.cwes, vec![400]);
        assert_eq!(
            vuln.advisories,
            vec![
                "https://nvd.nist.gov/vuln/detail/CVE-2019-1010083".to_string(),
                "https://github.com/pallets/flask/issues/2691".to_string(),
            ]
        );
    }

    #[test]
    fn test_normalize_credits() {
        let vuln = record().normalize(&flask(), "pkg:pypi/flask@0.12", &osv());
        let credits = vuln.credits.unwrap();
        assert_eq!(credits.individuals.len(), 1);
        assert_eq!(credits.individuals[0].name.as_deref(), Some("Jane Doe"));
        assert_eq!(
            credits.individuals[0].email.as_deref(),
            Some("jane@example.com")
        );
    }

    #[test]
    fn test_normalize_affected_target_uses_matching_package() {
        let vuln = record().normalize(&flask(), "pkg:pypi/flask@0.12", &osv());
        assert_eq!(vuln.affects.len(), 1);

        let target = &vuln.affects[0];
        assert_eq!(target.reference, "pkg:pypi/flask@0.12");
        assert_eq!(
            target.versions,
            vec![
                VersionSpec::Version {
                    version: "0.12".to_string(),
                    status: AffectedStatus::Affected
                },
                VersionSpec::Version {
                    version: "0.12.1".to_string(),
                    status: AffectedStatus::Affected
                },
                VersionSpec::Range {
                    range: "vers:pypi/<1.0".to_string(),
                    status: AffectedStatus::Affected
                },
            ]
        );
    }

    #[test]
    fn test_normalize_falls_back_to_all_affected_entries() {
        let other = Component::builder()
            .name("werkzeug")
            .purl(Purl::parse("pkg:pypi/werkzeug@0.15.5").unwrap())
            .build()
            .unwrap();
        let vuln = record().normalize(&other, "pkg:pypi/werkzeug@0.15.5", &osv());
        let ranges: Vec<&VersionSpec> = vuln.affects[0]
            .versions
            .iter()
            .filter(|v| matches!(v, VersionSpec::Range { .. }))
            .collect();
        assert_eq!(ranges.len(), 2);
        assert!(ranges.iter().any(|v| matches!(
            v,
            VersionSpec::Range { range, .. } if range == "vers:semver/<0.5.0"
        )));
    }

    #[test]
    fn test_normalize_minimal_record() {
        let minimal: OsvRecord = serde_json::from_str(r#"{"id": "OSV-2020-1"}"#).unwrap();
        let vuln = minimal.normalize(&flask(), "pkg:pypi/flask@0.12", &osv());
        assert!(vuln.references.is_empty());
        assert!(vuln.ratings.is_empty());
        assert!(vuln.cwes.is_empty());
        assert!(vuln.credits.is_none());
        assert!(vuln.published.is_none());
        assert!(vuln.description.is_none());
        assert_eq!(vuln.affects.len(), 1);
        assert!(vuln.affects[0].versions.is_empty());
    }

    #[test]
    fn test_semver_events_alternate() {
        let record: OsvRecord = serde_json::from_str(
            r#"{"id": "RUSTSEC-2021-0001", "affected": [{"package": {"name": "foo", "ecosystem": "crates.io"},
                "ranges": [{"type": "SEMVER", "events": [{"introduced": "1.0.0"}, {"fixed": "1.2.0"}, {"introduced": "2.0.0"}]}]}]}"#,
        )
        .unwrap();
        let component = Component::builder()
            .name("foo")
            .purl(Purl::parse("pkg:cargo/foo@1.1.0").unwrap())
            .build()
            .unwrap();
        let vuln = record.normalize(&component, "pkg:cargo/foo@1.1.0", &osv());
        assert_eq!(
            vuln.affects[0].versions,
            vec![VersionSpec::Range {
                range: "vers:semver/>=1.0.0|<1.2.0|>=2.0.0".to_string(),
                status: AffectedStatus::Affected
            }]
        );
    }

    #[test]
    fn test_unparsable_timestamp_is_absent() {
        assert!(parse_timestamp("2019-07-17").is_none());
        assert!(parse_timestamp("2019-07-17T21:24:00Z").is_some());
    }
}
