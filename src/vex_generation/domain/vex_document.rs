use super::component::Component;
use super::vulnerability::Vulnerability;
use chrono::{DateTime, Utc};

/// Provenance record for the tool that produced a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolIdentity {
    pub vendor: String,
    pub name: String,
    pub version: String,
    /// `(type, url)` pairs, e.g. `("vcs", "https://github.com/...")`
    pub external_references: Vec<(String, String)>,
}

impl ToolIdentity {
    /// Identity of this build, from Cargo package metadata
    pub fn current() -> Self {
        let mut external_references = Vec::new();
        let repository = env!("CARGO_PKG_REPOSITORY");
        if !repository.is_empty() {
            external_references.push(("vcs".to_string(), repository.to_string()));
        }
        let homepage = env!("CARGO_PKG_HOMEPAGE");
        if !homepage.is_empty() {
            external_references.push(("website".to_string(), homepage.to_string()));
        }

        Self {
            vendor: "CycloneDX".to_string(),
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            external_references,
        }
    }
}

/// The merged VEX result handed to an output encoder
#[derive(Debug, Clone, PartialEq)]
pub struct VexDocument {
    pub serial_number: String,
    pub version: u32,
    pub timestamp: DateTime<Utc>,
    pub tool: ToolIdentity,
    /// Primary component copied from the input BOM metadata
    pub component: Component,
    pub vulnerabilities: Vec<Vulnerability>,
}

impl VexDocument {
    pub fn has_vulnerabilities(&self) -> bool {
        !self.vulnerabilities.is_empty()
    }
}
