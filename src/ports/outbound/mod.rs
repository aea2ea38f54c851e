/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, console, etc.).
pub mod bom_parser;
pub mod bom_reader;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod source_adapter;

pub use bom_parser::{BomEncoding, BomParser};
pub use bom_reader::{BomReader, InputSource};
pub use formatter::VexFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use source_adapter::{ComponentPartition, SourceAdapter, SourceInfo};
