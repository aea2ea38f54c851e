/// Use cases module containing application business logic orchestration
mod aggregate_vulnerabilities;
mod generate_vex;

pub use aggregate_vulnerabilities::{AggregateVulnerabilitiesUseCase, Aggregation};
pub use generate_vex::GenerateVexUseCase;
