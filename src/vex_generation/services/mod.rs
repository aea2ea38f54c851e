mod cvss;
mod cwe;
mod version_range;
mod vex_builder;

pub use cvss::CvssCalculator;
pub use cwe::{parse_cwe, parse_cwes};
pub use version_range::{AffectedInterval, RangeEvent, UpperBound, VersRange};
pub use vex_builder::{rewrite_reference, VexDocumentBuilder};
