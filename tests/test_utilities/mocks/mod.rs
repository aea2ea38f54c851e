/// Mock implementations for testing
mod mock_bom_reader;
mod mock_progress_reporter;
mod mock_source;

pub use mock_bom_reader::MockBomReader;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_source::{MockSource, ALPHA, BETA};
