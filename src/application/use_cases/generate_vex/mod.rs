use crate::application::dto::{VexRequest, VexResponse};
use crate::application::factories::ParserFactory;
use crate::application::use_cases::AggregateVulnerabilitiesUseCase;
use crate::ports::outbound::{BomEncoding, BomReader, ProgressReporter, SourceAdapter};
use crate::shared::Result;
use crate::vex_generation::domain::{BomDocument, ToolIdentity};

/// GenerateVexUseCase - Core use case for VEX generation
///
/// Reads the input BOM, detects its encoding, parses it into the canonical
/// component model and aggregates the findings of every configured source.
/// Parsing fails before any source is contacted.
///
/// # Type Parameters
/// * `R` - BomReader implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateVexUseCase<R, PR> {
    bom_reader: R,
    sources: Vec<Box<dyn SourceAdapter>>,
    progress_reporter: PR,
}

impl<R, PR> GenerateVexUseCase<R, PR>
where
    R: BomReader,
    PR: ProgressReporter,
{
    /// Creates a new GenerateVexUseCase with injected dependencies
    pub fn new(bom_reader: R, sources: Vec<Box<dyn SourceAdapter>>, progress_reporter: PR) -> Self {
        Self {
            bom_reader,
            sources,
            progress_reporter,
        }
    }

    /// Executes the VEX generation use case
    ///
    /// # Arguments
    /// * `request` - Input location and source failure policy
    /// * `tool` - Identity recorded in the output document's metadata
    pub async fn execute(&self, request: VexRequest, tool: ToolIdentity) -> Result<VexResponse> {
        let bom = self.read_and_parse(&request)?;

        if self.sources.is_empty() {
            self.progress_reporter
                .report_error("⚠️  Warning: No vulnerability sources configured.");
        }

        let aggregation = AggregateVulnerabilitiesUseCase::new(&self.sources, &self.progress_reporter)
            .execute(&bom, tool, request.failure_policy)
            .await?;

        Ok(VexResponse {
            document: aggregation.document,
            summaries: aggregation.summaries,
            failures: aggregation.failures,
        })
    }

    fn read_and_parse(&self, request: &VexRequest) -> Result<BomDocument> {
        self.progress_reporter
            .report(&format!("📖 Loading BOM from: {}", request.input));

        let content = self.bom_reader.read_bom(&request.input)?;
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        let encoding = BomEncoding::detect(request.input.path(), content)?;
        tracing::debug!(?encoding, input = %request.input, "detected BOM encoding");

        let bom = ParserFactory::create(encoding).parse(content)?;
        let with_purl = bom
            .components()
            .iter()
            .filter(|c| c.purl().is_some())
            .count();
        self.progress_reporter.report(&format!(
            "✅ Detected {} component(s), {} with a package URL",
            bom.components().len(),
            with_purl
        ));

        Ok(bom)
    }
}
