use crate::adapters::outbound::formatters::{CycloneDxJsonFormatter, CycloneDxXmlFormatter};
use crate::application::dto::{OutputFormat, SchemaVersion};
use crate::ports::outbound::VexFormatter;

/// Factory for creating VEX encoders
///
/// Selects the encoder adapter for an output format and schema version.
/// Both inputs are already validated enums, so creation cannot fail.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates an encoder for the specified output format and schema version
    ///
    /// # Examples
    /// ```
    /// use vexy::application::dto::{OutputFormat, SchemaVersion};
    /// use vexy::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json, SchemaVersion::V1_4);
    /// ```
    pub fn create(format: OutputFormat, schema_version: SchemaVersion) -> Box<dyn VexFormatter> {
        match (format, schema_version) {
            (OutputFormat::Json, SchemaVersion::V1_4) => Box::new(CycloneDxJsonFormatter::new()),
            (OutputFormat::Xml, SchemaVersion::V1_4) => Box::new(CycloneDxXmlFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use vexy::application::dto::OutputFormat;
    /// use vexy::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Json);
    /// assert_eq!(message, "📝 Generating CycloneDX JSON VEX output...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Json => "📝 Generating CycloneDX JSON VEX output...",
            OutputFormat::Xml => "📝 Generating CycloneDX XML VEX output...",
        }
    }
}
