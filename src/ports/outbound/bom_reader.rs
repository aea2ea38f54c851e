use crate::shared::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where the input BOM comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `-` selects standard input, anything else is a path
    pub fn from_arg(value: &str) -> Self {
        if value == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(value))
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            InputSource::Stdin => None,
            InputSource::File(path) => Some(path),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => f.write_str("<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// BomReader port for reading the raw input document
///
/// This port abstracts the byte stream the BOM is read from
/// (a file on disk or standard input).
pub trait BomReader {
    /// Reads the whole document as UTF-8 text
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or is not a regular file
    /// - The input exceeds the maximum allowed size
    /// - The content is not valid UTF-8
    fn read_bom(&self, source: &InputSource) -> Result<String>;
}
