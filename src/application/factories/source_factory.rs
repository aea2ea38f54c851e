use crate::adapters::outbound::network::{OssIndexClient, OsvClient, OsvDbClient};
use crate::ports::outbound::SourceAdapter;
use crate::shared::error::VexError;
use crate::shared::Result;
use std::time::Duration;

type SourceConstructor = fn(&serde_yaml_ng::Value, Duration) -> Result<Box<dyn SourceAdapter>>;

/// Configuration key to adapter constructor
const REGISTRY: &[(&str, SourceConstructor)] = &[
    ("ossindex", create_ossindex),
    ("osv", create_osv),
    ("osvdb", create_osv_db),
];

/// Sources queried when neither `--sources` nor the config file names any
pub const DEFAULT_SOURCES: &[&str] = &["ossindex", "osv"];

fn create_ossindex(settings: &serde_yaml_ng::Value, timeout: Duration) -> Result<Box<dyn SourceAdapter>> {
    Ok(Box::new(OssIndexClient::new(settings, timeout)?))
}

fn create_osv(settings: &serde_yaml_ng::Value, timeout: Duration) -> Result<Box<dyn SourceAdapter>> {
    Ok(Box::new(OsvClient::new(settings, timeout)?))
}

fn create_osv_db(settings: &serde_yaml_ng::Value, timeout: Duration) -> Result<Box<dyn SourceAdapter>> {
    Ok(Box::new(OsvDbClient::new(settings, timeout)?))
}

/// Registry of vulnerability source adapters, keyed by configuration name
pub struct SourceFactory;

impl SourceFactory {
    /// All keys the registry can construct, in registry order
    pub fn known_keys() -> impl Iterator<Item = &'static str> {
        REGISTRY.iter().map(|(key, _)| *key)
    }

    pub fn is_known(key: &str) -> bool {
        Self::known_keys().any(|k| k == key)
    }

    /// Creates the adapter registered under `key`
    ///
    /// # Errors
    /// `VexError::Config` for an unregistered key; otherwise whatever the
    /// adapter reports about its settings.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use vexy::application::factories::SourceFactory;
    ///
    /// let source = SourceFactory::create("osv", &serde_yaml_ng::Value::Null, Duration::from_secs(30)).unwrap();
    /// assert_eq!(source.info().name, "OSV");
    /// ```
    pub fn create(
        key: &str,
        settings: &serde_yaml_ng::Value,
        timeout: Duration,
    ) -> Result<Box<dyn SourceAdapter>> {
        let constructor = REGISTRY
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, constructor)| *constructor)
            .ok_or_else(|| VexError::Config {
                details: format!("Unknown vulnerability source '{}'", key),
                hint: format!(
                    "Available sources: {}",
                    Self::known_keys().collect::<Vec<_>>().join(", ")
                ),
            })?;

        tracing::debug!(source = key, "creating vulnerability source");
        constructor(settings, timeout)
    }
}
