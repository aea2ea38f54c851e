use crate::ports::outbound::InputSource;

/// What to do when a vulnerability source fails mid-run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failing source (default)
    #[default]
    Abort,
    /// Record the failure, warn, and keep querying the remaining sources
    Continue,
}

/// VexRequest - Request DTO for the VEX generation use case
#[derive(Debug, Clone)]
pub struct VexRequest {
    /// Where the input BOM comes from
    pub input: InputSource,
    pub failure_policy: FailurePolicy,
}

impl VexRequest {
    pub fn new(input: InputSource, failure_policy: FailurePolicy) -> Self {
        Self {
            input,
            failure_policy,
        }
    }
}
