use crate::shared::error::VexError;
use crate::shared::Result;
use crate::vex_generation::domain::BomDocument;
use std::path::Path;

/// On-the-wire encoding of a CycloneDX BOM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BomEncoding {
    Json,
    Xml,
}

impl BomEncoding {
    /// Picks the encoding from the file extension, else from the first
    /// non-whitespace character of the content.
    ///
    /// # Errors
    /// Returns an error if neither gives an answer.
    pub fn detect(path: Option<&Path>, content: &str) -> Result<Self> {
        let by_extension = path
            .and_then(|p| p.extension())
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_ascii_lowercase().as_str() {
                "json" => Some(BomEncoding::Json),
                "xml" => Some(BomEncoding::Xml),
                _ => None,
            });
        if let Some(encoding) = by_extension {
            return Ok(encoding);
        }

        match content.trim_start_matches('\u{feff}').trim_start().chars().next() {
            Some('{') => Ok(BomEncoding::Json),
            Some('<') => Ok(BomEncoding::Xml),
            _ => Err(VexError::BomParse {
                stage: "encoding detection".to_string(),
                details: "input is neither a JSON object nor an XML document".to_string(),
            }
            .into()),
        }
    }
}

/// BomParser port for turning a serialized BOM into the canonical model
///
/// Every implementation must produce the same [`BomDocument`] for the same
/// logical data, whatever the encoding.
pub trait BomParser {
    /// Parses a whole document; there is no partial result
    ///
    /// # Errors
    /// Returns an error if:
    /// - The document is not well-formed
    /// - The metadata block or its primary component is missing
    /// - Any component carries a non-empty, invalid purl
    fn parse(&self, content: &str) -> Result<BomDocument>;
}
