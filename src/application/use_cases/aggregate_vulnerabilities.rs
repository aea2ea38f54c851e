use crate::application::dto::{FailurePolicy, SourceFailure, SourceSummary};
use crate::ports::outbound::{ProgressReporter, SourceAdapter};
use crate::shared::error::VexError;
use crate::shared::Result;
use crate::vex_generation::domain::{BomDocument, ToolIdentity, VexDocument};
use crate::vex_generation::services::VexDocumentBuilder;

/// Outcome of querying every configured source
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub document: VexDocument,
    pub summaries: Vec<SourceSummary>,
    pub failures: Vec<SourceFailure>,
}

/// AggregateVulnerabilitiesUseCase - Queries each source and merges the results
///
/// Sources run one after another in configuration order. Each receives only
/// the components it considers eligible; its findings are appended to the
/// output document unchanged, so the same advisory reported by two sources
/// appears twice, once per source.
pub struct AggregateVulnerabilitiesUseCase<'a, PR> {
    sources: &'a [Box<dyn SourceAdapter>],
    progress_reporter: &'a PR,
}

impl<'a, PR: ProgressReporter> AggregateVulnerabilitiesUseCase<'a, PR> {
    pub fn new(sources: &'a [Box<dyn SourceAdapter>], progress_reporter: &'a PR) -> Self {
        Self {
            sources,
            progress_reporter,
        }
    }

    /// Runs every source against the BOM's components
    ///
    /// # Errors
    /// Under `FailurePolicy::Abort`, the first source failure is returned as
    /// `VexError::SourceQuery` naming the source.
    pub async fn execute(
        &self,
        bom: &BomDocument,
        tool: ToolIdentity,
        failure_policy: FailurePolicy,
    ) -> Result<Aggregation> {
        let mut builder = VexDocumentBuilder::new(bom, tool);
        let mut summaries = Vec::with_capacity(self.sources.len());
        let mut failures = Vec::new();
        let total = self.sources.len();

        for (idx, source) in self.sources.iter().enumerate() {
            let name = source.info().name;
            let partition = source.partition(bom.components());

            self.progress_reporter.report(&format!(
                "🔍 Querying {} for {} component(s)...",
                name,
                partition.eligible.len()
            ));
            let skipped = partition.skipped_count();
            if skipped > 0 {
                self.progress_reporter.report(&format!(
                    "   - Skipped {} component(s) without a package URL",
                    skipped
                ));
                for component in partition.skipped() {
                    tracing::debug!(
                        source = name,
                        component = %component.reference(),
                        "component not eligible for source"
                    );
                }
            }

            let outcome = if partition.eligible.is_empty() {
                Ok(Vec::new())
            } else {
                source.query(&partition.eligible).await
            };
            self.progress_reporter
                .report_progress(idx + 1, total, Some(name));

            match outcome {
                Ok(vulnerabilities) => {
                    tracing::info!(
                        source = name,
                        found = vulnerabilities.len(),
                        "source query complete"
                    );
                    summaries.push(SourceSummary {
                        source: name.to_string(),
                        queried: partition.eligible.len(),
                        skipped,
                        found: vulnerabilities.len(),
                    });
                    builder.extend(vulnerabilities);
                }
                Err(e) => match failure_policy {
                    FailurePolicy::Abort => {
                        return Err(VexError::SourceQuery {
                            source_name: name.to_string(),
                            details: format!("{:#}", e),
                        }
                        .into());
                    }
                    FailurePolicy::Continue => {
                        tracing::warn!(source = name, error = %e, "source query failed");
                        self.progress_reporter.report_error(&format!(
                            "⚠️  Warning: {} failed and was skipped: {}",
                            name, e
                        ));
                        failures.push(SourceFailure {
                            source: name.to_string(),
                            message: format!("{:#}", e),
                        });
                    }
                },
            }
        }

        Ok(Aggregation {
            document: builder.build(),
            summaries,
            failures,
        })
    }
}
