use super::vulnerability::VulnerabilitySource;
use crate::shared::Result;

/// CVSS base score, validated to the 0.0..=10.0 range
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct CvssScore(f64);

impl CvssScore {
    pub fn new(score: f64) -> Result<Self> {
        if !(0.0..=10.0).contains(&score) {
            anyhow::bail!("CVSS score must be between 0.0 and 10.0, got {}", score);
        }
        Ok(Self(score))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Severity band of a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    None,
    Info,
    Low,
    Medium,
    High,
    Critical,
    Unknown,
}

impl Severity {
    /// Standard CVSS v3 qualitative severity rating scale
    pub fn from_cvss_score(score: CvssScore) -> Self {
        let value = score.value();
        if value == 0.0 {
            Severity::None
        } else if value < 4.0 {
            Severity::Low
        } else if value < 7.0 {
            Severity::Medium
        } else if value < 9.0 {
            Severity::High
        } else {
            Severity::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
            Severity::Unknown => "unknown",
        }
    }
}

/// Scoring method a rating was produced with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreMethod {
    CvssV2,
    CvssV3,
    CvssV31,
    Owasp,
    Other,
}

impl ScoreMethod {
    /// Infers the method from the prefix of a raw vector string
    pub fn from_vector(vector: &str) -> Self {
        let vector = vector.trim();
        if vector.starts_with("CVSS:3.1/") {
            ScoreMethod::CvssV31
        } else if vector.starts_with("CVSS:3.0/") || vector.starts_with("CVSS:3/") {
            ScoreMethod::CvssV3
        } else if vector.starts_with("AV:") || vector.starts_with("(AV:") {
            ScoreMethod::CvssV2
        } else if vector.starts_with("SL:") {
            ScoreMethod::Owasp
        } else {
            ScoreMethod::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreMethod::CvssV2 => "CVSSv2",
            ScoreMethod::CvssV3 => "CVSSv3",
            ScoreMethod::CvssV31 => "CVSSv31",
            ScoreMethod::Owasp => "OWASP",
            ScoreMethod::Other => "other",
        }
    }
}

/// One severity rating of a vulnerability
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rating {
    pub source: Option<VulnerabilitySource>,
    pub score: Option<CvssScore>,
    pub severity: Option<Severity>,
    pub method: Option<ScoreMethod>,
    pub vector: Option<String>,
}
