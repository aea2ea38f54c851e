use crate::vex_generation::domain::VexDocument;

/// A source that failed while the run continued under `FailurePolicy::Continue`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub source: String,
    pub message: String,
}

/// Per-source query statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    pub source: String,
    /// Components sent to the source
    pub queried: usize,
    /// Components without a purl, never sent
    pub skipped: usize,
    /// Vulnerability records returned
    pub found: usize,
}

/// VexResponse - Response DTO from the VEX generation use case
#[derive(Debug, Clone)]
pub struct VexResponse {
    pub document: VexDocument,
    pub summaries: Vec<SourceSummary>,
    pub failures: Vec<SourceFailure>,
}

impl VexResponse {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
