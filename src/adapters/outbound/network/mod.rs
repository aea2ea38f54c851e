/// Network adapters for the vulnerability data sources
mod ossindex_client;
mod osv_client;
mod osv_db_client;
mod osv_schema;
#[cfg(test)]
mod test_server;

pub use ossindex_client::{OssIndexClient, OssIndexSettings};
pub use osv_client::{OsvClient, OsvSettings};
pub use osv_db_client::{OsvDbClient, OsvDbSettings};

use crate::shared::error::VexError;
use crate::shared::Result;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Shared HTTP client setup: per-call timeout and a `vexy/<version>` user agent
fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?)
}

/// Deserializes a source's opaque settings; missing settings mean defaults
fn settings_from<T>(settings: &serde_yaml_ng::Value, source_name: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if settings.is_null() {
        return Ok(T::default());
    }
    serde_yaml_ng::from_value(settings.clone()).map_err(|e| {
        VexError::Config {
            details: format!("Invalid settings for source '{}': {}", source_name, e),
            hint: "Check the 'settings' mapping of this source in the configuration file"
                .to_string(),
        }
        .into()
    })
}
