use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::PathBuf;

/// Presenter type enumeration for factory pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    /// Write to a file; `force` allows replacing an existing one
    File { path: PathBuf, force: bool },
}

impl PresenterType {
    /// Maps an `--output` argument to a presenter type (`-` is stdout)
    pub fn from_arg(output: &str, force: bool) -> Self {
        if output == "-" {
            PresenterType::Stdout
        } else {
            PresenterType::File {
                path: PathBuf::from(output),
                force,
            }
        }
    }
}

/// Factory for creating output presenters
pub struct PresenterFactory;

impl PresenterFactory {
    /// Creates a presenter instance for the specified type
    ///
    /// # Examples
    /// ```
    /// use vexy::application::factories::{PresenterFactory, PresenterType};
    ///
    /// let presenter = PresenterFactory::create(PresenterType::Stdout);
    /// ```
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File { path, force } => Box::new(FileSystemWriter::new(path, force)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_presenter_type_from_arg() {
        assert_eq!(PresenterType::from_arg("-", false), PresenterType::Stdout);
        assert_eq!(
            PresenterType::from_arg("out.xml", true),
            PresenterType::File {
                path: PathBuf::from("out.xml"),
                force: true
            }
        );
    }

    #[test]
    fn test_create_file_presenter_writes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vex.json");
        let presenter = PresenterFactory::create(PresenterType::File {
            path: path.clone(),
            force: false,
        });

        presenter.present("{}").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_create_file_presenter_respects_force() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vex.json");
        std::fs::write(&path, "old").unwrap();

        let refused = PresenterFactory::create(PresenterType::File {
            path: path.clone(),
            force: false,
        });
        assert!(refused.present("new").is_err());

        let forced = PresenterFactory::create(PresenterType::File {
            path: path.clone(),
            force: true,
        });
        forced.present("new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }
}
