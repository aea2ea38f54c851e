use crate::ports::outbound::VexFormatter;
use crate::shared::Result;
use crate::vex_generation::domain::{
    self, AffectedTarget, Rating, VersionSpec, VexDocument, VulnerabilitySource,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Bom {
    #[serde(rename = "bomFormat")]
    bom_format: &'static str,
    #[serde(rename = "specVersion")]
    spec_version: &'static str,
    #[serde(rename = "serialNumber")]
    serial_number: String,
    version: u32,
    metadata: Metadata,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    vulnerabilities: Vec<Vulnerability>,
}

#[derive(Debug, Serialize)]
struct Metadata {
    timestamp: String,
    tools: Vec<Tool>,
    component: Component,
}

#[derive(Debug, Serialize)]
struct Tool {
    vendor: String,
    name: String,
    version: String,
    #[serde(rename = "externalReferences", skip_serializing_if = "Vec::is_empty")]
    external_references: Vec<ExternalReference>,
}

#[derive(Debug, Serialize)]
struct ExternalReference {
    #[serde(rename = "type")]
    reference_type: String,
    url: String,
}

#[derive(Debug, Serialize)]
struct Component {
    #[serde(rename = "type")]
    component_type: &'static str,
    #[serde(rename = "mime-type", skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
    #[serde(rename = "bom-ref", skip_serializing_if = "Option::is_none")]
    bom_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    copyright: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cpe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purl: Option<String>,
}

#[derive(Debug, Serialize)]
struct Vulnerability {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    source: Source,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    references: Vec<Reference>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ratings: Vec<JsonRating>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cwes: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    advisories: Vec<Advisory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    credits: Option<Credits>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    affects: Vec<Affect>,
}

#[derive(Debug, Serialize)]
struct Source {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

#[derive(Debug, Serialize)]
struct Reference {
    id: String,
    source: Source,
}

#[derive(Debug, Serialize)]
struct JsonRating {
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    severity: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vector: Option<String>,
}

#[derive(Debug, Serialize)]
struct Advisory {
    url: String,
}

#[derive(Debug, Serialize)]
struct Credits {
    individuals: Vec<Individual>,
}

#[derive(Debug, Serialize)]
struct Individual {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
}

#[derive(Debug, Serialize)]
struct Affect {
    #[serde(rename = "ref")]
    bom_ref: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    versions: Vec<AffectedVersion>,
}

#[derive(Debug, Serialize)]
struct AffectedVersion {
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<String>,
    status: &'static str,
}

/// CycloneDX 1.4 JSON encoder for VEX documents
pub struct CycloneDxJsonFormatter;

impl CycloneDxJsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CycloneDxJsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl VexFormatter for CycloneDxJsonFormatter {
    fn format(&self, document: &VexDocument) -> Result<String> {
        let bom = Bom {
            bom_format: "CycloneDX",
            spec_version: "1.4",
            serial_number: document.serial_number.clone(),
            version: document.version,
            metadata: self.build_metadata(document),
            vulnerabilities: document
                .vulnerabilities
                .iter()
                .map(|v| self.build_vulnerability(v))
                .collect(),
        };

        serde_json::to_string_pretty(&bom).map_err(Into::into)
    }
}

impl CycloneDxJsonFormatter {
    fn build_metadata(&self, document: &VexDocument) -> Metadata {
        let tool = &document.tool;
        Metadata {
            timestamp: format_timestamp(&document.timestamp),
            tools: vec![Tool {
                vendor: tool.vendor.clone(),
                name: tool.name.clone(),
                version: tool.version.clone(),
                external_references: tool
                    .external_references
                    .iter()
                    .map(|(reference_type, url)| ExternalReference {
                        reference_type: reference_type.clone(),
                        url: url.clone(),
                    })
                    .collect(),
            }],
            component: self.build_component(&document.component),
        }
    }

    fn build_component(&self, component: &domain::Component) -> Component {
        Component {
            component_type: component.kind().as_str(),
            mime_type: component.mime_type().map(str::to_string),
            bom_ref: component.bom_ref().map(str::to_string),
            author: component.author().map(str::to_string),
            publisher: component.publisher().map(str::to_string),
            group: component.group().map(str::to_string),
            name: component.name().to_string(),
            version: component.version().map(str::to_string),
            description: component.description().map(str::to_string),
            scope: component.scope().map(str::to_string),
            copyright: component.copyright().map(str::to_string),
            cpe: component.cpe().map(str::to_string),
            purl: component.purl().map(|p| p.to_string()),
        }
    }

    fn build_vulnerability(&self, vulnerability: &domain::Vulnerability) -> Vulnerability {
        Vulnerability {
            id: vulnerability.id.clone(),
            source: build_source(&vulnerability.source),
            references: vulnerability
                .references
                .iter()
                .map(|r| Reference {
                    id: r.id.clone(),
                    source: build_source(&r.source),
                })
                .collect(),
            ratings: vulnerability.ratings.iter().map(build_rating).collect(),
            cwes: vulnerability.cwes.clone(),
            description: vulnerability.description.clone(),
            detail: vulnerability.detail.clone(),
            advisories: vulnerability
                .advisories
                .iter()
                .map(|url| Advisory { url: url.clone() })
                .collect(),
            published: vulnerability.published.as_ref().map(format_timestamp),
            updated: vulnerability.updated.as_ref().map(format_timestamp),
            credits: vulnerability.credits.as_ref().map(|c| Credits {
                individuals: c
                    .individuals
                    .iter()
                    .map(|i| Individual {
                        name: i.name.clone(),
                        email: i.email.clone(),
                        phone: i.phone.clone(),
                    })
                    .collect(),
            }),
            affects: vulnerability.affects.iter().map(build_affect).collect(),
        }
    }
}

fn build_source(source: &VulnerabilitySource) -> Source {
    Source {
        name: source.name.clone(),
        url: source.url.clone(),
    }
}

fn build_rating(rating: &Rating) -> JsonRating {
    JsonRating {
        source: rating.source.as_ref().map(build_source),
        score: rating.score.map(|s| s.value()),
        severity: rating.severity.map(|s| s.as_str()),
        method: rating.method.map(|m| m.as_str()),
        vector: rating.vector.clone(),
    }
}

fn build_affect(target: &AffectedTarget) -> Affect {
    Affect {
        bom_ref: target.reference.clone(),
        versions: target
            .versions
            .iter()
            .map(|spec| match spec {
                VersionSpec::Version { version, status } => AffectedVersion {
                    version: Some(version.clone()),
                    range: None,
                    status: status.as_str(),
                },
                VersionSpec::Range { range, status } => AffectedVersion {
                    version: None,
                    range: Some(range.clone()),
                    status: status.as_str(),
                },
            })
            .collect(),
    }
}

pub(super) fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}
