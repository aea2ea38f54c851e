use crate::vex_generation::domain::{CvssScore, Rating, ScoreMethod, Severity, VulnerabilitySource};
use std::collections::HashMap;

/// CvssCalculator service for turning raw CVSS data into canonical ratings
///
/// Only CVSS v3.x base vectors are scored; other vector versions keep their
/// method and raw vector but no score or band.
pub struct CvssCalculator;

impl CvssCalculator {
    /// Rating from a numeric score, with the method taken from the vector when known
    pub fn rating_from_score(
        score: f64,
        vector: Option<&str>,
        source: Option<VulnerabilitySource>,
    ) -> Rating {
        let score = CvssScore::new(score).ok();
        Rating {
            source,
            score,
            severity: score.map(Severity::from_cvss_score),
            method: vector.map(ScoreMethod::from_vector),
            vector: vector.map(str::to_string),
        }
    }

    /// Rating from a raw vector; score and band only when the vector is scorable
    pub fn rating_from_vector(vector: &str, source: Option<VulnerabilitySource>) -> Rating {
        let score = Self::base_score(vector);
        Rating {
            source,
            score,
            severity: score.map(Severity::from_cvss_score),
            method: Some(ScoreMethod::from_vector(vector)),
            vector: Some(vector.to_string()),
        }
    }

    /// CVSS v3.0/v3.1 base score of a vector string
    ///
    /// Returns `None` for other versions or a vector missing a base metric.
    pub fn base_score(vector: &str) -> Option<CvssScore> {
        let mut parts = vector.trim().split('/');
        let version = parts.next()?;
        if !matches!(version, "CVSS:3.0" | "CVSS:3.1") {
            return None;
        }

        let metrics: HashMap<&str, &str> = parts
            .filter_map(|part| part.split_once(':'))
            .collect();

        let scope_changed = match *metrics.get("S")? {
            "U" => false,
            "C" => true,
            _ => return None,
        };

        let av = match *metrics.get("AV")? {
            "N" => 0.85,
            "A" => 0.62,
            "L" => 0.55,
            "P" => 0.2,
            _ => return None,
        };

        let ac = match *metrics.get("AC")? {
            "L" => 0.77,
            "H" => 0.44,
            _ => return None,
        };

        let pr = match (*metrics.get("PR")?, scope_changed) {
            ("N", _) => 0.85,
            ("L", false) => 0.62,
            ("L", true) => 0.68,
            ("H", false) => 0.27,
            ("H", true) => 0.5,
            _ => return None,
        };

        let ui = match *metrics.get("UI")? {
            "N" => 0.85,
            "R" => 0.62,
            _ => return None,
        };

        let cia = |key: &str| -> Option<f64> {
            match *metrics.get(key)? {
                "N" => Some(0.0),
                "L" => Some(0.22),
                "H" => Some(0.56),
                _ => None,
            }
        };
        let (c, i, a) = (cia("C")?, cia("I")?, cia("A")?);

        let iss = 1.0_f64 - ((1.0 - c) * (1.0 - i) * (1.0 - a));
        let impact = if scope_changed {
            7.52 * (iss - 0.029) - 3.25 * (iss - 0.02_f64).powi(15)
        } else {
            6.42 * iss
        };
        let exploitability = 8.22 * av * ac * pr * ui;

        let base = if impact <= 0.0 {
            0.0
        } else if scope_changed {
            round_up(f64::min(1.08 * (impact + exploitability), 10.0))
        } else {
            round_up(f64::min(impact + exploitability, 10.0))
        };

        CvssScore::new(base).ok()
    }
}

/// CVSS v3.1 "Roundup": smallest one-decimal value >= input, stable under float noise
fn round_up(value: f64) -> f64 {
    let scaled = (value * 100_000.0).round() as i64;
    if scaled % 10_000 == 0 {
        scaled as f64 / 100_000.0
    } else {
        ((scaled / 10_000) + 1) as f64 / 10.0
    }
}
