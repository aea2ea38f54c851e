use super::rating::Rating;
use chrono::{DateTime, Utc};

/// Organisation or database a vulnerability record (or one of its IDs) came from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VulnerabilitySource {
    pub name: String,
    pub url: Option<String>,
}

impl VulnerabilitySource {
    pub fn new(name: impl Into<String>, url: Option<String>) -> Self {
        Self {
            name: name.into(),
            url,
        }
    }

    /// NIST National Vulnerability Database entry for a CVE ID
    pub fn nvd(cve_id: &str) -> Self {
        Self::new(
            "National Vulnerability Database",
            Some(format!("https://nvd.nist.gov/vuln/detail/{}", cve_id)),
        )
    }
}

/// Cross-reference to the same vulnerability in another database
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VulnerabilityReference {
    pub id: String,
    pub source: VulnerabilitySource,
}

/// Individual credited with finding or reporting a vulnerability
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Contact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Credits {
    pub individuals: Vec<Contact>,
}

/// Affected status of a version specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AffectedStatus {
    Affected,
    Unaffected,
    Unknown,
}

impl AffectedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AffectedStatus::Affected => "affected",
            AffectedStatus::Unaffected => "unaffected",
            AffectedStatus::Unknown => "unknown",
        }
    }
}

/// Versions of a target a vulnerability applies to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionSpec {
    /// One exact version
    Version {
        version: String,
        status: AffectedStatus,
    },
    /// A `vers:` range expression
    Range {
        range: String,
        status: AffectedStatus,
    },
}

impl VersionSpec {
    pub fn status(&self) -> AffectedStatus {
        match self {
            VersionSpec::Version { status, .. } | VersionSpec::Range { status, .. } => *status,
        }
    }
}

/// One component affected by a vulnerability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffectedTarget {
    /// Component reference; adapter-local until the aggregator scopes it to the document
    pub reference: String,
    pub versions: Vec<VersionSpec>,
}

impl AffectedTarget {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            versions: Vec::new(),
        }
    }

    pub fn with_version(mut self, spec: VersionSpec) -> Self {
        self.versions.push(spec);
        self
    }
}

/// Canonical vulnerability record every source adapter normalizes into
///
/// Two records are the same only when both `id` and `source` match; records
/// from different sources are never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct Vulnerability {
    pub id: Option<String>,
    pub source: VulnerabilitySource,
    pub references: Vec<VulnerabilityReference>,
    pub ratings: Vec<Rating>,
    pub cwes: Vec<u32>,
    pub description: Option<String>,
    pub detail: Option<String>,
    pub advisories: Vec<String>,
    pub credits: Option<Credits>,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub affects: Vec<AffectedTarget>,
}

impl Vulnerability {
    pub fn new(id: Option<String>, source: VulnerabilitySource) -> Self {
        Self {
            id,
            source,
            references: Vec::new(),
            ratings: Vec::new(),
            cwes: Vec::new(),
            description: None,
            detail: None,
            advisories: Vec::new(),
            credits: None,
            published: None,
            updated: None,
            affects: Vec::new(),
        }
    }

    /// Identity used when reporting: `<source>:<id>`
    pub fn identity(&self) -> String {
        format!(
            "{}:{}",
            self.source.name,
            self.id.as_deref().unwrap_or("<unidentified>")
        )
    }
}
