use crate::ports::outbound::{BomReader, InputSource};
use crate::shared::error::VexError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_BOM_SIZE};
use crate::shared::Result;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// FileSystemReader adapter for reading the input BOM
///
/// This adapter implements the BomReader port for files on disk and for
/// standard input (`-`).
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Safely read a file with security checks:
    /// - Reject symbolic links
    /// - Validate file is a regular file
    /// - Check file size limits
    fn safe_read_file(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(VexError::FileReadError {
                path: path.to_path_buf(),
                details: "File does not exist".to_string(),
            }
            .into());
        }

        validate_regular_file(path, "input BOM")?;

        fs::read_to_string(path).map_err(|e| {
            VexError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    fn read_stdin(&self) -> Result<String> {
        let mut content = String::new();
        io::stdin()
            .lock()
            .take(MAX_BOM_SIZE + 1)
            .read_to_string(&mut content)
            .map_err(|e| VexError::FileReadError {
                path: PathBuf::from("<stdin>"),
                details: e.to_string(),
            })?;

        validate_file_size(content.len() as u64, Path::new("<stdin>"), MAX_BOM_SIZE)?;
        Ok(content)
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl BomReader for FileSystemReader {
    fn read_bom(&self, source: &InputSource) -> Result<String> {
        match source {
            InputSource::Stdin => self.read_stdin(),
            InputSource::File(path) => self.safe_read_file(path),
        }
    }
}
