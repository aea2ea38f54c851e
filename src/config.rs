//! Configuration file support for vexy.
//!
//! Provides YAML-based configuration through `vexy.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::application::dto::{OutputFormat, SchemaVersion};
use crate::application::factories::SourceFactory;
use crate::shared::error::VexError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "vexy.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub schema_version: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub continue_on_source_error: Option<bool>,
    /// Active sources in query order; an empty list disables querying.
    pub sources: Option<Vec<SourceEntry>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// One vulnerability source and its adapter-specific settings.
#[derive(Debug, Deserialize)]
pub struct SourceEntry {
    pub name: String,
    #[serde(default)]
    pub settings: serde_yaml_ng::Value,
}

impl ConfigFile {
    /// Settings declared for the source `key`, or null when absent.
    pub fn settings_for(&self, key: &str) -> serde_yaml_ng::Value {
        self.sources
            .iter()
            .flatten()
            .find(|entry| entry.name == key)
            .map(|entry| entry.settings.clone())
            .unwrap_or_default()
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    tracing::debug!(path = %config_path.display(), "using discovered config file");
    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(format) = &config.format {
        if let Err(e) = OutputFormat::from_str(format) {
            return Err(VexError::UnsupportedOutput { details: e }.into());
        }
    }
    if let Some(version) = &config.schema_version {
        if let Err(e) = SchemaVersion::from_str(version) {
            return Err(VexError::UnsupportedOutput { details: e }.into());
        }
    }
    if config.timeout_seconds == Some(0) {
        bail!(
            "Invalid config: timeout_seconds must be greater than zero.\n\n\
             💡 Hint: Omit the field to use the default of 30 seconds."
        );
    }

    if let Some(ref sources) = config.sources {
        for (i, entry) in sources.iter().enumerate() {
            if entry.name.trim().is_empty() {
                bail!(
                    "Invalid config: sources[{}].name must not be empty.\n\n\
                     💡 Hint: Each sources entry must have a non-empty 'name' field (e.g., \"osv\").",
                    i
                );
            }
            if !SourceFactory::is_known(&entry.name) {
                return Err(VexError::Config {
                    details: format!("sources[{}] names unknown source '{}'", i, entry.name),
                    hint: format!(
                        "Available sources: {}",
                        SourceFactory::known_keys().collect::<Vec<_>>().join(", ")
                    ),
                }
                .into());
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
