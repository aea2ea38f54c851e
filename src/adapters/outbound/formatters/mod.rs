/// Encoder adapters for the CycloneDX VEX output formats
mod cyclonedx_json_formatter;
mod cyclonedx_xml_formatter;
#[cfg(test)]
mod test_fixtures;

pub use cyclonedx_json_formatter::CycloneDxJsonFormatter;
pub use cyclonedx_xml_formatter::CycloneDxXmlFormatter;
