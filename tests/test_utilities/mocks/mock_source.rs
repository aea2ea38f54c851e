use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use vexy::prelude::*;
use vexy::vex_generation::domain::{AffectedStatus, AffectedTarget, VersionSpec};

pub static ALPHA: SourceInfo = SourceInfo {
    name: "Alpha",
    description: "First in-memory source",
    url: "https://alpha.example/",
    ecosystems: &[EcoSystem::PyPi, EcoSystem::Maven],
};

pub static BETA: SourceInfo = SourceInfo {
    name: "Beta",
    description: "Second in-memory source",
    url: "https://beta.example/",
    ecosystems: &[EcoSystem::PyPi, EcoSystem::Maven],
};

/// Mock SourceAdapter that reports one advisory per queried component
///
/// Every purl it is asked about is recorded in `queried`.
#[derive(Clone)]
pub struct MockSource {
    info: &'static SourceInfo,
    advisory_id: String,
    should_fail: bool,
    pub queried: Arc<Mutex<Vec<String>>>,
}

impl MockSource {
    pub fn new(info: &'static SourceInfo, advisory_id: &str) -> Self {
        Self {
            info,
            advisory_id: advisory_id.to_string(),
            should_fail: false,
            queried: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(info: &'static SourceInfo) -> Self {
        Self {
            should_fail: true,
            ..Self::new(info, "")
        }
    }

    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }
}

#[async_trait]
impl SourceAdapter for MockSource {
    fn info(&self) -> &SourceInfo {
        self.info
    }

    async fn query(&self, eligible: &[&Component]) -> Result<Vec<Vulnerability>> {
        if self.should_fail {
            anyhow::bail!("{} is unreachable", self.info.name);
        }

        let mut queried = self.queried.lock().unwrap();
        Ok(eligible
            .iter()
            .filter_map(|component| component.purl())
            .map(|purl| {
                queried.push(purl.to_string());
                let mut vulnerability =
                    Vulnerability::new(Some(self.advisory_id.clone()), self.info.as_source());
                let mut target = AffectedTarget::new(purl.as_str());
                if let Some(version) = purl.version() {
                    target = target.with_version(VersionSpec::Version {
                        version: version.to_string(),
                        status: AffectedStatus::Affected,
                    });
                }
                vulnerability.affects.push(target);
                vulnerability
            })
            .collect())
    }
}
