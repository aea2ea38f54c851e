use crate::vex_generation::domain::{
    BomDocument, Component, ToolIdentity, VexDocument, Vulnerability,
};
use chrono::Utc;
use uuid::Uuid;

/// Scopes an adapter-local component reference to a document:
/// `<document-urn>#<percent-encoded-local-ref>`.
pub fn rewrite_reference(document_urn: &str, local_ref: &str) -> String {
    format!("{}#{}", document_urn, urlencoding::encode(local_ref))
}

/// VexDocumentBuilder service for merging per-source results into one document
///
/// Records are appended in the order they are added; nothing is merged or
/// deduplicated, so the same advisory reported by two sources appears twice.
pub struct VexDocumentBuilder {
    document_urn: String,
    tool: ToolIdentity,
    component: Component,
    vulnerabilities: Vec<Vulnerability>,
}

impl VexDocumentBuilder {
    /// Starts a document for `bom`, scoping references to its serial number
    pub fn new(bom: &BomDocument, tool: ToolIdentity) -> Self {
        Self {
            document_urn: bom.serial_number().to_string(),
            tool,
            component: bom.primary_component().clone(),
            vulnerabilities: Vec::new(),
        }
    }

    pub fn document_urn(&self) -> &str {
        &self.document_urn
    }

    /// Adds a vulnerability after rewriting its affected-target references
    pub fn add(&mut self, mut vulnerability: Vulnerability) {
        for target in &mut vulnerability.affects {
            target.reference = rewrite_reference(&self.document_urn, &target.reference);
        }
        self.vulnerabilities.push(vulnerability);
    }

    pub fn extend(&mut self, vulnerabilities: impl IntoIterator<Item = Vulnerability>) {
        for vulnerability in vulnerabilities {
            self.add(vulnerability);
        }
    }

    pub fn len(&self) -> usize {
        self.vulnerabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vulnerabilities.is_empty()
    }

    /// Finishes the document with a fresh serial number and timestamp
    pub fn build(self) -> VexDocument {
        VexDocument {
            serial_number: format!("urn:uuid:{}", Uuid::new_v4()),
            version: 1,
            timestamp: Utc::now(),
            tool: self.tool,
            component: self.component,
            vulnerabilities: self.vulnerabilities,
        }
    }
}
