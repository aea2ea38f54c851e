//! Shared sample document for encoder tests

use crate::vex_generation::domain::{
    AffectedStatus, AffectedTarget, Component, ComponentKind, Contact, Credits, CvssScore, Rating,
    ScoreMethod, Severity, ToolIdentity, VersionSpec, VexDocument, Vulnerability,
    VulnerabilityReference, VulnerabilitySource,
};
use chrono::{TimeZone, Utc};

pub fn sample_document() -> VexDocument {
    let osv = VulnerabilitySource::new("OSV", Some("https://osv.dev/".to_string()));

    let mut scored = Vulnerability::new(Some("CVE-2018-1000656".to_string()), osv.clone());
    scored.references.push(VulnerabilityReference {
        id: "CVE-2018-1000656".to_string(),
        source: VulnerabilitySource::nvd("CVE-2018-1000656"),
    });
    scored.ratings.push(Rating {
        source: Some(osv),
        score: Some(CvssScore::new(7.5).unwrap()),
        severity: Some(Severity::High),
        method: Some(ScoreMethod::CvssV3),
        vector: Some("CVSS:3.0/AV:N/AC:L/PR:N/UI:N/S:U/C:N/I:N/A:H".to_string()),
    });
    scored.cwes = vec![20];
    scored.description = Some("Improper Input Validation in flask".to_string());
    scored.detail = Some("Flask before 0.12.3 mishandles JSON <input> & encodings".to_string());
    scored.advisories = vec!["https://github.com/pallets/flask/pull/2691".to_string()];
    scored.published = Some(Utc.with_ymd_and_hms(2018, 8, 20, 19, 31, 0).unwrap());
    scored.credits = Some(Credits {
        individuals: vec![Contact {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            phone: None,
        }],
    });
    scored.affects.push(
        AffectedTarget::new(
            "urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79#pkg%3Apypi%2Fflask%400.12",
        )
        .with_version(VersionSpec::Version {
            version: "0.12".to_string(),
            status: AffectedStatus::Affected,
        })
        .with_version(VersionSpec::Range {
            range: "vers:pypi/<0.12.3".to_string(),
            status: AffectedStatus::Affected,
        }),
    );

    let bare = Vulnerability::new(
        Some("sonatype-2019-0001".to_string()),
        VulnerabilitySource::new("OSS Index by Sonatype", None),
    );

    VexDocument {
        serial_number: "urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79".to_string(),
        version: 1,
        timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        tool: ToolIdentity {
            vendor: "CycloneDX".to_string(),
            name: "vexy".to_string(),
            version: "0.1.0".to_string(),
            external_references: vec![(
                "vcs".to_string(),
                "https://github.com/example/vexy".to_string(),
            )],
        },
        component: Component::builder()
            .kind(ComponentKind::Application)
            .name("acme-app")
            .version("1.0.0")
            .build()
            .unwrap(),
        vulnerabilities: vec![scored, bare],
    }
}
