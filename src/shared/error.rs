use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the VEX document was produced
    Success = 0,
    /// Vulnerabilities were found and `--fail-on-vulnerabilities` was requested
    VulnerabilitiesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (parse error, source query error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::VulnerabilitiesDetected => write!(f, "Vulnerabilities Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for VEX generation.
///
/// Every variant names the stage, source or component at fault, because a run
/// consults several sources and the user otherwise cannot tell which one failed.
#[derive(Debug, Error)]
pub enum VexError {
    #[error("Failed to parse CycloneDX BOM ({stage})\nDetails: {details}\n\n💡 Hint: Please verify that the input is a valid CycloneDX document")]
    BomParse { stage: String, details: String },

    #[error("Required BOM section is missing: {section}\n\n💡 Hint: A CycloneDX BOM must declare a metadata block containing the primary component")]
    MissingSection { section: String },

    #[error("Invalid package URL: {purl}\nDetails: {details}\n\n💡 Hint: Package URLs must follow the purl specification (pkg:<type>/<namespace>/<name>@<version>)")]
    InvalidPurl { purl: String, details: String },

    #[error("Vulnerability source '{source_name}' failed\nDetails: {details}\n\n💡 Hint: Check network connectivity, or rerun with --continue-on-source-error to skip failing sources")]
    SourceQuery {
        source_name: String,
        details: String,
    },

    #[error("Unsupported output: {details}\n\n💡 Hint: Supported formats are 'xml' and 'json', supported schema version is '1.4'")]
    UnsupportedOutput { details: String },

    #[error("Invalid configuration: {details}\n\n💡 Hint: {hint}")]
    Config { details: String, hint: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Output file already exists: {path}\n\n💡 Hint: Pass --force to overwrite it, or choose another path with --output")]
    OutputExists { path: PathBuf },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
