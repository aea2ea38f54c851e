use crate::shared::Result;
use anyhow::Context;
use std::fmt::{self, Display, Formatter};

/// One event of an ordered affected-range timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeEvent {
    Introduced(String),
    Fixed(String),
    LastAffected(String),
    Limit(String),
}

/// Upper end of an affected interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpperBound {
    /// First version no longer affected (exclusive)
    Fixed(String),
    /// Last version still affected (inclusive)
    LastAffected(String),
}

/// One contiguous affected interval; `None` bounds are unbounded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffectedInterval {
    pub introduced: Option<String>,
    pub upper: Option<UpperBound>,
}

impl AffectedInterval {
    fn is_unbounded(&self) -> bool {
        self.introduced.is_none() && self.upper.is_none()
    }
}

/// Affected version range in purl `vers:` syntax
///
/// Built from an ordered event timeline; each `introduced` opens an interval and
/// the next `fixed` or `last_affected` closes it, so alternating pairs become
/// separate `|`-joined clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersRange {
    scheme: String,
    intervals: Vec<AffectedInterval>,
}

impl VersRange {
    /// Reconstructs the range; `None` when the events describe no interval
    pub fn from_events(scheme: impl Into<String>, events: &[RangeEvent]) -> Option<Self> {
        let mut intervals = Vec::new();
        let mut open: Option<AffectedInterval> = None;

        for event in events {
            match event {
                RangeEvent::Introduced(version) => {
                    if let Some(previous) = open.take() {
                        intervals.push(previous);
                    }
                    open = Some(AffectedInterval {
                        introduced: lower_bound(version),
                        upper: None,
                    });
                }
                RangeEvent::Fixed(version) | RangeEvent::LastAffected(version) => {
                    let upper = match event {
                        RangeEvent::Fixed(_) => UpperBound::Fixed(version.clone()),
                        _ => UpperBound::LastAffected(version.clone()),
                    };
                    let mut interval = open.take().unwrap_or(AffectedInterval {
                        introduced: None,
                        upper: None,
                    });
                    interval.upper = Some(upper);
                    intervals.push(interval);
                }
                RangeEvent::Limit(_) => {}
            }
        }
        intervals.extend(open);

        if intervals.is_empty() {
            return None;
        }

        Some(Self {
            scheme: scheme.into(),
            intervals,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn intervals(&self) -> &[AffectedInterval] {
        &self.intervals
    }

    /// Membership test for semver-compatible versions
    ///
    /// # Errors
    /// Returns an error if `version` or any bound is not a semantic version.
    pub fn contains(&self, version: &str) -> Result<bool> {
        let version = parse_semver(version)?;
        for interval in &self.intervals {
            let above_lower = match &interval.introduced {
                Some(lower) => version >= parse_semver(lower)?,
                None => true,
            };
            let below_upper = match &interval.upper {
                Some(UpperBound::Fixed(fixed)) => version < parse_semver(fixed)?,
                Some(UpperBound::LastAffected(last)) => version <= parse_semver(last)?,
                None => true,
            };
            if above_lower && below_upper {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl Display for VersRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "vers:{}/", self.scheme)?;
        if self.intervals.iter().any(AffectedInterval::is_unbounded) {
            return f.write_str("*");
        }

        let mut constraints = Vec::new();
        for interval in &self.intervals {
            if let Some(lower) = &interval.introduced {
                constraints.push(format!(">={}", lower));
            }
            match &interval.upper {
                Some(UpperBound::Fixed(version)) => constraints.push(format!("<{}", version)),
                Some(UpperBound::LastAffected(version)) => {
                    constraints.push(format!("<={}", version))
                }
                None => {}
            }
        }
        f.write_str(&constraints.join("|"))
    }
}

/// `0` marks "affected since the first release"
fn lower_bound(version: &str) -> Option<String> {
    match version.trim() {
        "" | "0" => None,
        v => Some(v.to_string()),
    }
}

fn parse_semver(version: &str) -> Result<semver::Version> {
    let trimmed = version.trim().trim_start_matches('v');
    semver::Version::parse(trimmed)
        .with_context(|| format!("'{}' is not a semantic version", version))
}
