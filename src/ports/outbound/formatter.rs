use crate::shared::Result;
use crate::vex_generation::domain::VexDocument;

/// VexFormatter port for encoding the finished VEX document
///
/// This port abstracts the wire encoding of the output document
/// (CycloneDX JSON, CycloneDX XML) and its schema version.
pub trait VexFormatter {
    /// Encodes the document
    ///
    /// # Arguments
    /// * `document` - The merged VEX document with rewritten component references
    ///
    /// # Returns
    /// Encoded document content as a string
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, document: &VexDocument) -> Result<String>;
}
