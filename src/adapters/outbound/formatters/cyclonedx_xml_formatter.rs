use super::cyclonedx_json_formatter::format_timestamp;
use crate::ports::outbound::VexFormatter;
use crate::shared::Result;
use crate::vex_generation::domain::{
    AffectedTarget, Component, Rating, VersionSpec, VexDocument, Vulnerability, VulnerabilitySource,
};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

const NAMESPACE: &str = "http://cyclonedx.org/schema/bom/1.4";

/// CycloneDX 1.4 XML encoder for VEX documents
///
/// Element order follows the 1.4 XSD sequences, so the output validates
/// against the schema as well as being readable by the XML BOM parser.
pub struct CycloneDxXmlFormatter;

impl CycloneDxXmlFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CycloneDxXmlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl VexFormatter for CycloneDxXmlFormatter {
    fn format(&self, document: &VexDocument) -> Result<String> {
        let mut writer = XmlWriter::new();
        writer
            .inner
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let version = document.version.to_string();
        writer.start(
            "bom",
            &[
                ("xmlns", NAMESPACE),
                ("serialNumber", &document.serial_number),
                ("version", &version),
            ],
        )?;
        self.write_metadata(&mut writer, document)?;
        if document.has_vulnerabilities() {
            writer.start("vulnerabilities", &[])?;
            for vulnerability in &document.vulnerabilities {
                self.write_vulnerability(&mut writer, vulnerability)?;
            }
            writer.end("vulnerabilities")?;
        }
        writer.end("bom")?;

        writer.finish()
    }
}

impl CycloneDxXmlFormatter {
    fn write_metadata(&self, w: &mut XmlWriter, document: &VexDocument) -> Result<()> {
        w.start("metadata", &[])?;
        w.text("timestamp", &format_timestamp(&document.timestamp))?;

        let tool = &document.tool;
        w.start("tools", &[])?;
        w.start("tool", &[])?;
        w.text("vendor", &tool.vendor)?;
        w.text("name", &tool.name)?;
        w.text("version", &tool.version)?;
        if !tool.external_references.is_empty() {
            w.start("externalReferences", &[])?;
            for (reference_type, url) in &tool.external_references {
                w.start("reference", &[("type", reference_type)])?;
                w.text("url", url)?;
                w.end("reference")?;
            }
            w.end("externalReferences")?;
        }
        w.end("tool")?;
        w.end("tools")?;

        self.write_component(w, &document.component)?;
        w.end("metadata")
    }

    fn write_component(&self, w: &mut XmlWriter, component: &Component) -> Result<()> {
        let mut attributes = vec![("type", component.kind().as_str())];
        if let Some(bom_ref) = component.bom_ref() {
            attributes.push(("bom-ref", bom_ref));
        }
        if let Some(mime_type) = component.mime_type() {
            attributes.push(("mime-type", mime_type));
        }

        w.start("component", &attributes)?;
        w.optional_text("author", component.author())?;
        w.optional_text("publisher", component.publisher())?;
        w.optional_text("group", component.group())?;
        w.text("name", component.name())?;
        w.optional_text("version", component.version())?;
        w.optional_text("description", component.description())?;
        w.optional_text("scope", component.scope())?;
        w.optional_text("copyright", component.copyright())?;
        w.optional_text("cpe", component.cpe())?;
        w.optional_text("purl", component.purl().map(|p| p.as_str()))?;
        w.end("component")
    }

    fn write_vulnerability(&self, w: &mut XmlWriter, vulnerability: &Vulnerability) -> Result<()> {
        w.start("vulnerability", &[])?;
        w.optional_text("id", vulnerability.id.as_deref())?;
        write_source(w, "source", &vulnerability.source)?;

        if !vulnerability.references.is_empty() {
            w.start("references", &[])?;
            for reference in &vulnerability.references {
                w.start("reference", &[])?;
                w.text("id", &reference.id)?;
                write_source(w, "source", &reference.source)?;
                w.end("reference")?;
            }
            w.end("references")?;
        }

        if !vulnerability.ratings.is_empty() {
            w.start("ratings", &[])?;
            for rating in &vulnerability.ratings {
                write_rating(w, rating)?;
            }
            w.end("ratings")?;
        }

        if !vulnerability.cwes.is_empty() {
            w.start("cwes", &[])?;
            for cwe in &vulnerability.cwes {
                w.text("cwe", &cwe.to_string())?;
            }
            w.end("cwes")?;
        }

        w.optional_text("description", vulnerability.description.as_deref())?;
        w.optional_text("detail", vulnerability.detail.as_deref())?;

        if !vulnerability.advisories.is_empty() {
            w.start("advisories", &[])?;
            for url in &vulnerability.advisories {
                w.start("advisory", &[])?;
                w.text("url", url)?;
                w.end("advisory")?;
            }
            w.end("advisories")?;
        }

        w.optional_text(
            "published",
            vulnerability.published.as_ref().map(format_timestamp).as_deref(),
        )?;
        w.optional_text(
            "updated",
            vulnerability.updated.as_ref().map(format_timestamp).as_deref(),
        )?;

        if let Some(credits) = &vulnerability.credits {
            w.start("credits", &[])?;
            w.start("individuals", &[])?;
            for individual in &credits.individuals {
                w.start("individual", &[])?;
                w.optional_text("name", individual.name.as_deref())?;
                w.optional_text("email", individual.email.as_deref())?;
                w.optional_text("phone", individual.phone.as_deref())?;
                w.end("individual")?;
            }
            w.end("individuals")?;
            w.end("credits")?;
        }

        if !vulnerability.affects.is_empty() {
            w.start("affects", &[])?;
            for target in &vulnerability.affects {
                write_target(w, target)?;
            }
            w.end("affects")?;
        }

        w.end("vulnerability")
    }
}

fn write_source(w: &mut XmlWriter, element: &str, source: &VulnerabilitySource) -> Result<()> {
    w.start(element, &[])?;
    w.text("name", &source.name)?;
    w.optional_text("url", source.url.as_deref())?;
    w.end(element)
}

fn write_rating(w: &mut XmlWriter, rating: &Rating) -> Result<()> {
    w.start("rating", &[])?;
    if let Some(source) = &rating.source {
        write_source(w, "source", source)?;
    }
    w.optional_text("score", rating.score.map(|s| s.value().to_string()).as_deref())?;
    w.optional_text("severity", rating.severity.map(|s| s.as_str()))?;
    w.optional_text("method", rating.method.map(|m| m.as_str()))?;
    w.optional_text("vector", rating.vector.as_deref())?;
    w.end("rating")
}

fn write_target(w: &mut XmlWriter, target: &AffectedTarget) -> Result<()> {
    w.start("target", &[])?;
    w.text("ref", &target.reference)?;
    if !target.versions.is_empty() {
        w.start("versions", &[])?;
        for spec in &target.versions {
            w.start("version", &[])?;
            match spec {
                VersionSpec::Version { version, .. } => w.text("version", version)?,
                VersionSpec::Range { range, .. } => w.text("range", range)?,
            }
            w.text("status", spec.status().as_str())?;
            w.end("version")?;
        }
        w.end("versions")?;
    }
    w.end("target")
}

/// Thin element-level helpers over `quick_xml::Writer`
struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    fn new() -> Self {
        Self {
            inner: Writer::new_with_indent(Vec::new(), b' ', 4),
        }
    }

    fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.inner.write_event(Event::Start(element))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.inner.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn text(&mut self, name: &str, value: &str) -> Result<()> {
        self.start(name, &[])?;
        self.inner.write_event(Event::Text(BytesText::new(value)))?;
        self.end(name)
    }

    fn optional_text(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => self.text(name, value),
            None => Ok(()),
        }
    }

    fn finish(self) -> Result<String> {
        Ok(String::from_utf8(self.inner.into_inner())?)
    }
}
