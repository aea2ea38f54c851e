use crate::adapters::outbound::parsers::{CycloneDxJsonParser, CycloneDxXmlParser};
use crate::ports::outbound::{BomEncoding, BomParser};

/// Factory for creating BOM parsers from a detected encoding
pub struct ParserFactory;

impl ParserFactory {
    pub fn create(encoding: BomEncoding) -> Box<dyn BomParser> {
        match encoding {
            BomEncoding::Json => Box::new(CycloneDxJsonParser::new()),
            BomEncoding::Xml => Box::new(CycloneDxXmlParser::new()),
        }
    }
}
