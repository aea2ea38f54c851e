//! vexy - VEX generation from CycloneDX SBOMs
//!
//! This library reads a CycloneDX BOM (JSON or XML), asks one or more public
//! vulnerability sources about its components, normalizes every answer into
//! one vulnerability model and writes a CycloneDX 1.4 VEX document.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`vex_generation`): Component and vulnerability models,
//!   CVSS scoring, version ranges and document assembly
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Parsers, encoders, source clients, filesystem and console
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use vexy::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<()> {
//! let sources = vec![SourceFactory::create(
//!     "osv",
//!     &serde_yaml_ng::Value::Null,
//!     Duration::from_secs(30),
//! )?];
//! let use_case = GenerateVexUseCase::new(
//!     FileSystemReader::new(),
//!     sources,
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = VexRequest::new(InputSource::from_arg("bom.json"), FailurePolicy::Abort);
//! let response = use_case.execute(request, ToolIdentity::current()).await?;
//!
//! let formatter = FormatterFactory::create(OutputFormat::Json, SchemaVersion::V1_4);
//! println!("{}", formatter.format(&response.document)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod shared;
pub mod vex_generation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{QuietProgressReporter, StderrProgressReporter};
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        CycloneDxJsonFormatter, CycloneDxXmlFormatter,
    };
    pub use crate::adapters::outbound::network::{OssIndexClient, OsvClient, OsvDbClient};
    pub use crate::adapters::outbound::parsers::{CycloneDxJsonParser, CycloneDxXmlParser};
    pub use crate::application::dto::{
        FailurePolicy, OutputFormat, SchemaVersion, SourceFailure, SourceSummary, VexRequest,
        VexResponse,
    };
    pub use crate::application::factories::{
        FormatterFactory, ParserFactory, PresenterFactory, PresenterType, SourceFactory,
    };
    pub use crate::application::use_cases::{AggregateVulnerabilitiesUseCase, GenerateVexUseCase};
    pub use crate::ports::outbound::{
        BomEncoding, BomParser, BomReader, InputSource, OutputPresenter, ProgressReporter,
        SourceAdapter, SourceInfo, VexFormatter,
    };
    pub use crate::vex_generation::domain::{
        BomDocument, Component, EcoSystem, Purl, ToolIdentity, VexDocument, Vulnerability,
    };
    pub use crate::vex_generation::services::{CvssCalculator, VersRange, VexDocumentBuilder};
    pub use crate::shared::Result;
}
