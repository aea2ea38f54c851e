/// Integration tests for vexy
/// These tests verify the interaction between parsers, sources, the
/// aggregator and the encoders, using in-memory mock sources.
mod test_utilities;

use std::path::PathBuf;
use test_utilities::mocks::{MockBomReader, MockProgressReporter, MockSource, ALPHA, BETA};
use vexy::prelude::*;

const SERIAL: &str = "urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79";

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

fn tool() -> ToolIdentity {
    ToolIdentity::current()
}

#[test]
fn test_json_and_xml_parse_to_same_document() {
    let from_json = CycloneDxJsonParser::new().parse(&fixture("bom.json")).unwrap();
    let from_xml = CycloneDxXmlParser::new().parse(&fixture("bom.xml")).unwrap();

    assert_eq!(from_json, from_xml);
    assert_eq!(from_json.serial_number(), SERIAL);
    assert_eq!(from_json.primary_component().name(), "acme-app");

    let names: Vec<&str> = from_json.components().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["flask", "werkzeug", "commons-text", "vendored-lib"]);
}

#[test]
fn test_structured_fields_ignored_in_both_encodings() {
    let json = r#"{
        "metadata": {"component": {"type": "application", "name": "acme-app"}},
        "components": [{
            "type": "application",
            "name": "Acme Application",
            "version": "9.1.1",
            "description": "Acme's flagship application",
            "swid": {
                "tagId": "swidgen-242eb18a-503e-ca37-393b-cf156ef09691_9.1.1",
                "name": "Acme Application",
                "version": "9.1.1"
            },
            "externalReferences": [{"type": "website", "url": "https://acme.example"}]
        }]
    }"#;
    let xml = r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.4">
        <metadata><component type="application"><name>acme-app</name></component></metadata>
        <components>
            <component type="application">
                <name>Acme Application</name>
                <version>9.1.1</version>
                <description>Acme's <!-- product -->flagship application</description>
                <swid tagId="swidgen-242eb18a-503e-ca37-393b-cf156ef09691_9.1.1" name="Acme Application" version="9.1.1"/>
                <externalReferences>
                    <reference type="website"><url>https://acme.example</url></reference>
                </externalReferences>
            </component>
        </components>
    </bom>"#;

    let from_json = CycloneDxJsonParser::new().parse(json).unwrap();
    let from_xml = CycloneDxXmlParser::new().parse(xml).unwrap();

    assert_eq!(from_json.components(), from_xml.components());
    assert!(from_xml.components()[0].extra().is_empty());
    assert_eq!(
        from_xml.components()[0].description(),
        Some("Acme's flagship application")
    );
}

#[test]
fn test_purls_survive_parsing() {
    let bom = CycloneDxJsonParser::new().parse(&fixture("bom.json")).unwrap();

    let purls: Vec<String> = bom
        .components()
        .iter()
        .filter_map(|c| c.purl())
        .map(|p| p.to_string())
        .collect();
    assert_eq!(
        purls,
        vec![
            "pkg:pypi/flask@0.12",
            "pkg:pypi/werkzeug@0.14",
            "pkg:maven/org.apache.commons/commons-text@1.9",
        ]
    );
}

#[tokio::test]
async fn test_only_components_with_purl_are_queried() {
    let source = MockSource::new(&ALPHA, "ALPHA-1");
    let reporter = MockProgressReporter::new();
    let use_case = GenerateVexUseCase::new(
        MockBomReader::new(fixture("bom.json")),
        vec![Box::new(source.clone()) as Box<dyn SourceAdapter>],
        reporter.clone(),
    );

    let response = use_case
        .execute(
            VexRequest::new(InputSource::from_arg("bom.json"), FailurePolicy::Abort),
            tool(),
        )
        .await
        .unwrap();

    assert_eq!(source.queried().len(), 3);
    assert_eq!(response.document.vulnerabilities.len(), 3);
    assert_eq!(
        response.summaries,
        vec![SourceSummary {
            source: "Alpha".to_string(),
            queried: 3,
            skipped: 1,
            found: 3,
        }]
    );

    let messages = reporter.get_messages();
    assert!(messages
        .iter()
        .any(|m| m.contains("Detected 4 component(s), 3 with a package URL")));
    assert!(messages
        .iter()
        .any(|m| m.contains("Skipped 1 component(s) without a package URL")));
}

#[tokio::test]
async fn test_findings_from_two_sources_are_kept_apart() {
    let alpha = MockSource::new(&ALPHA, "CVE-2023-30861");
    let beta = MockSource::new(&BETA, "CVE-2023-30861");
    let use_case = GenerateVexUseCase::new(
        MockBomReader::new(fixture("bom.json")),
        vec![
            Box::new(alpha) as Box<dyn SourceAdapter>,
            Box::new(beta) as Box<dyn SourceAdapter>,
        ],
        MockProgressReporter::new(),
    );

    let document = use_case
        .execute(
            VexRequest::new(InputSource::from_arg("bom.json"), FailurePolicy::Abort),
            tool(),
        )
        .await
        .unwrap()
        .document;

    assert_eq!(document.vulnerabilities.len(), 6);
    let origins: Vec<&str> = document
        .vulnerabilities
        .iter()
        .map(|v| v.source.name.as_str())
        .collect();
    assert_eq!(
        origins,
        vec!["Alpha", "Alpha", "Alpha", "Beta", "Beta", "Beta"]
    );
}

#[tokio::test]
async fn test_affected_references_point_into_input_bom() {
    let use_case = GenerateVexUseCase::new(
        MockBomReader::new(fixture("bom.xml")),
        vec![Box::new(MockSource::new(&ALPHA, "ALPHA-1")) as Box<dyn SourceAdapter>],
        MockProgressReporter::new(),
    );

    let document = use_case
        .execute(
            VexRequest::new(InputSource::from_arg("bom.xml"), FailurePolicy::Abort),
            tool(),
        )
        .await
        .unwrap()
        .document;

    let first = &document.vulnerabilities[0].affects[0];
    assert_eq!(first.reference, format!("{}#pkg%3Apypi%2Fflask%400.12", SERIAL));
    assert_eq!(document.component.name(), "acme-app");
    assert_ne!(document.serial_number, SERIAL);
    assert_eq!(document.version, 1);
}

#[tokio::test]
async fn test_abort_stops_at_failing_source() {
    let beta = MockSource::new(&BETA, "BETA-1");
    let use_case = GenerateVexUseCase::new(
        MockBomReader::new(fixture("bom.json")),
        vec![
            Box::new(MockSource::failing(&ALPHA)) as Box<dyn SourceAdapter>,
            Box::new(beta.clone()) as Box<dyn SourceAdapter>,
        ],
        MockProgressReporter::new(),
    );

    let err = use_case
        .execute(
            VexRequest::new(InputSource::from_arg("bom.json"), FailurePolicy::Abort),
            tool(),
        )
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Vulnerability source 'Alpha' failed"));
    assert!(beta.queried().is_empty());
}

#[tokio::test]
async fn test_continue_keeps_other_sources() {
    let reporter = MockProgressReporter::new();
    let use_case = GenerateVexUseCase::new(
        MockBomReader::new(fixture("bom.json")),
        vec![
            Box::new(MockSource::failing(&ALPHA)) as Box<dyn SourceAdapter>,
            Box::new(MockSource::new(&BETA, "BETA-1")) as Box<dyn SourceAdapter>,
        ],
        reporter.clone(),
    );

    let response = use_case
        .execute(
            VexRequest::new(InputSource::from_arg("bom.json"), FailurePolicy::Continue),
            tool(),
        )
        .await
        .unwrap();

    assert!(response.has_failures());
    assert_eq!(response.failures[0].source, "Alpha");
    assert!(response.failures[0].message.contains("unreachable"));
    assert_eq!(response.document.vulnerabilities.len(), 3);
    assert!(reporter
        .get_messages()
        .iter()
        .any(|m| m.starts_with("Error:") && m.contains("Alpha")));
}

#[tokio::test]
async fn test_read_failure_is_reported() {
    let source = MockSource::new(&ALPHA, "ALPHA-1");
    let use_case = GenerateVexUseCase::new(
        MockBomReader::with_failure(),
        vec![Box::new(source.clone()) as Box<dyn SourceAdapter>],
        MockProgressReporter::new(),
    );

    let result = use_case
        .execute(
            VexRequest::new(InputSource::from_arg("bom.json"), FailurePolicy::Abort),
            tool(),
        )
        .await;

    assert!(result.is_err());
    assert!(source.queried().is_empty());
}

#[tokio::test]
async fn test_full_pipeline_json_and_xml_output() {
    let use_case = GenerateVexUseCase::new(
        MockBomReader::new(fixture("bom.json")),
        vec![Box::new(MockSource::new(&ALPHA, "ALPHA-1")) as Box<dyn SourceAdapter>],
        MockProgressReporter::new(),
    );
    let document = use_case
        .execute(
            VexRequest::new(InputSource::from_arg("bom.json"), FailurePolicy::Abort),
            tool(),
        )
        .await
        .unwrap()
        .document;

    let json = FormatterFactory::create(OutputFormat::Json, SchemaVersion::V1_4)
        .format(&document)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["bomFormat"], "CycloneDX");
    assert_eq!(value["specVersion"], "1.4");
    assert_eq!(value["metadata"]["component"]["name"], "acme-app");
    assert_eq!(value["vulnerabilities"].as_array().unwrap().len(), 3);
    assert_eq!(value["vulnerabilities"][0]["id"], "ALPHA-1");
    assert_eq!(value["vulnerabilities"][0]["source"]["name"], "Alpha");
    assert_eq!(
        value["vulnerabilities"][2]["affects"][0]["versions"][0]["version"],
        "1.9"
    );

    let xml = FormatterFactory::create(OutputFormat::Xml, SchemaVersion::V1_4)
        .format(&document)
        .unwrap();
    assert!(xml.contains("xmlns=\"http://cyclonedx.org/schema/bom/1.4\""));
    assert_eq!(xml.matches("<vulnerability>").count(), 3);
    assert!(xml.contains("<id>ALPHA-1</id>"));
}
