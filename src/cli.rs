use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use vexy::application::dto::{FailurePolicy, OutputFormat, SchemaVersion};
use vexy::application::factories::{PresenterType, SourceFactory, DEFAULT_SOURCES};
use vexy::config::ConfigFile;
use vexy::ports::outbound::InputSource;
use vexy::shared::error::VexError;
use vexy::shared::Result;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Generate a CycloneDX VEX document for the components of a CycloneDX SBOM
#[derive(Parser, Debug)]
#[command(name = "vexy")]
#[command(version)]
#[command(
    about = "Generate VEX (Vulnerability Exploitability Exchange) in CycloneDX format from a CycloneDX SBOM",
    long_about = None
)]
pub struct Args {
    /// CycloneDX BOM to read (JSON or XML), or '-' for standard input
    #[arg(short = 'i', long = "in-file", value_name = "PATH")]
    pub input: String,

    /// Output format: xml or json [default: xml]
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// CycloneDX schema version of the output [default: 1.4]
    #[arg(long = "schema-version", value_name = "VERSION")]
    pub schema_version: Option<SchemaVersion>,

    /// Output file path, or '-' for stdout [default: cyclonedx-vex.<format>]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Overwrite the output file if it already exists
    #[arg(long)]
    pub force: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short = 'X', long)]
    pub debug: bool,

    /// Path to a config file [default: ./vexy.config.yml when present]
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Vulnerability sources to query, comma separated (ossindex, osv, osvdb)
    #[arg(long, value_delimiter = ',', value_name = "KEY")]
    pub sources: Option<Vec<String>>,

    /// Keep going when a source fails, reporting the failure as a warning
    #[arg(long)]
    pub continue_on_source_error: bool,

    /// Per-request timeout for vulnerability sources, in seconds [default: 30]
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Exit with code 1 when any vulnerability is reported
    #[arg(long)]
    pub fail_on_vulnerabilities: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// A source to construct, with the settings handed to its adapter
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSelection {
    pub key: String,
    pub settings: serde_yaml_ng::Value,
}

/// Effective options for one run: CLI flags layered over the config file
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: InputSource,
    pub format: OutputFormat,
    pub schema_version: SchemaVersion,
    pub presenter: PresenterType,
    pub sources: Vec<SourceSelection>,
    pub failure_policy: FailurePolicy,
    pub timeout: Duration,
    pub fail_on_vulnerabilities: bool,
}

impl RunOptions {
    /// Merges `args` over `config`; CLI flags win.
    pub fn resolve(args: &Args, config: Option<&ConfigFile>) -> Result<Self> {
        let format = match (args.format, config.and_then(|c| c.format.as_deref())) {
            (Some(format), _) => format,
            (None, Some(format)) => format
                .parse()
                .map_err(|details| VexError::UnsupportedOutput { details })?,
            (None, None) => OutputFormat::default(),
        };

        let schema_version = match (
            args.schema_version,
            config.and_then(|c| c.schema_version.as_deref()),
        ) {
            (Some(version), _) => version,
            (None, Some(version)) => version
                .parse()
                .map_err(|details| VexError::UnsupportedOutput { details })?,
            (None, None) => SchemaVersion::default(),
        };

        let output = args
            .output
            .clone()
            .unwrap_or_else(|| format.default_file_name());

        let continue_on_error = args.continue_on_source_error
            || config
                .and_then(|c| c.continue_on_source_error)
                .unwrap_or(false);
        let failure_policy = if continue_on_error {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        };

        let timeout_seconds = args
            .timeout
            .or_else(|| config.and_then(|c| c.timeout_seconds))
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        Ok(Self {
            input: InputSource::from_arg(&args.input),
            format,
            schema_version,
            presenter: PresenterType::from_arg(&output, args.force),
            sources: select_sources(args.sources.as_deref(), config)?,
            failure_policy,
            timeout: Duration::from_secs(timeout_seconds),
            fail_on_vulnerabilities: args.fail_on_vulnerabilities,
        })
    }
}

/// `--sources` wins, then the config's `sources` list, then the defaults.
/// Settings always come from the config entry of the same name.
fn select_sources(requested: Option<&[String]>, config: Option<&ConfigFile>) -> Result<Vec<SourceSelection>> {
    let settings_for = |key: &str| {
        config
            .map(|c| c.settings_for(key))
            .unwrap_or_default()
    };

    let keys: Vec<String> = match (requested, config.and_then(|c| c.sources.as_ref())) {
        (Some(requested), _) => requested
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect(),
        (None, Some(entries)) => entries.iter().map(|e| e.name.clone()).collect(),
        (None, None) => DEFAULT_SOURCES.iter().map(|k| k.to_string()).collect(),
    };

    keys.into_iter()
        .map(|key| {
            if !SourceFactory::is_known(&key) {
                return Err(VexError::Config {
                    details: format!("Unknown vulnerability source '{}'", key),
                    hint: format!(
                        "Available sources: {}",
                        SourceFactory::known_keys().collect::<Vec<_>>().join(", ")
                    ),
                }
                .into());
            }
            let settings = settings_for(&key);
            Ok(SourceSelection { key, settings })
        })
        .collect()
}
