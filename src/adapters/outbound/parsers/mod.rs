/// Parser adapters for the CycloneDX BOM encodings
mod cyclonedx_json_parser;
mod cyclonedx_xml_parser;

pub use cyclonedx_json_parser::CycloneDxJsonParser;
pub use cyclonedx_xml_parser::CycloneDxXmlParser;
