/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod output_format;
mod vex_request;
mod vex_response;

pub use output_format::{OutputFormat, SchemaVersion};
pub use vex_request::{FailurePolicy, VexRequest};
pub use vex_response::{SourceFailure, SourceSummary, VexResponse};
