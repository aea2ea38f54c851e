use crate::shared::Result;
use crate::vex_generation::domain::{Component, EcoSystem, Vulnerability, VulnerabilitySource};
use async_trait::async_trait;

/// Static description of a vulnerability data source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub url: &'static str,
    pub ecosystems: &'static [EcoSystem],
}

impl SourceInfo {
    /// The source as it appears on vulnerability records
    pub fn as_source(&self) -> VulnerabilitySource {
        VulnerabilitySource::new(self.name, Some(self.url.to_string()))
    }

    pub fn covers(&self, ecosystem: EcoSystem) -> bool {
        self.ecosystems.contains(&ecosystem)
    }
}

/// All components handed to a source, and the subset it can query
#[derive(Debug, Clone)]
pub struct ComponentPartition<'a> {
    pub all: &'a [Component],
    pub eligible: Vec<&'a Component>,
}

impl<'a> ComponentPartition<'a> {
    /// Components the source cannot query
    pub fn skipped(&self) -> impl Iterator<Item = &'a Component> + '_ {
        self.all
            .iter()
            .filter(move |c| !self.eligible.iter().any(|e| std::ptr::eq(*e, *c)))
    }

    pub fn skipped_count(&self) -> usize {
        self.all.len() - self.eligible.len()
    }
}

/// SourceAdapter port for one vulnerability data source
///
/// Adapters hold configuration only; no vulnerability state survives
/// between `query` calls.
///
/// # Async Support
/// Queries are async for network I/O.
/// Implementations must be `Send + Sync`.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Name, description, public URL and claimed ecosystems
    fn info(&self) -> &SourceInfo;

    /// Whether this source can query `component`; requires a purl by default
    fn is_eligible(&self, component: &Component) -> bool {
        component.purl().is_some()
    }

    /// Splits `components` by [`SourceAdapter::is_eligible`], preserving order
    fn partition<'a>(&self, components: &'a [Component]) -> ComponentPartition<'a> {
        ComponentPartition {
            all: components,
            eligible: components.iter().filter(|c| self.is_eligible(c)).collect(),
        }
    }

    /// Runs the source's query protocol and normalizes the findings
    ///
    /// Affected-target references are the adapter's local identifiers
    /// (the queried purl); the aggregator scopes them to the output document.
    ///
    /// # Errors
    /// Returns an error on network failure, a non-success response or a
    /// malformed response body.
    async fn query(&self, eligible: &[&Component]) -> Result<Vec<Vulnerability>>;
}
