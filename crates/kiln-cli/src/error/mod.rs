//! Error handling for the Kiln CLI.
//!
//! `CliError` wraps the library's `ConfigError` together with the failures
//! that only occur at the command layer: files and layered overrides.
//! `main` converts it into a `miette::Report` for display.

mod report;

use std::path::PathBuf;
use thiserror::Error;

pub use kiln_config::ConfigError;
pub use report::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or validating the configuration failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The configuration has validation errors (already printed)
    #[error("Configuration has {count} error(s)")]
    ValidationFailed { count: usize },

    /// `--strict` was given and warnings were found
    #[error("Configuration has {count} warning(s) and --strict is set")]
    StrictWarnings { count: usize },

    /// Environment or flag overrides could not be applied
    #[error("Invalid override: {0}")]
    Override(#[from] figment::Error),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Refusing to overwrite an existing file
    #[error("File already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

impl CliError {
    /// Actionable hint shown under the error.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Config(err) => err.hint(),
            Self::StrictWarnings { .. } => {
                Some("Fix the warnings above or run without --strict".to_string())
            }
            Self::Override(_) => Some(
                "Check KILN_* environment variables, e.g. KILN_BUILD__TARGET=es2020".to_string(),
            ),
            Self::AlreadyExists(_) => Some("Pass --force to overwrite it".to_string()),
            _ => None,
        }
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into `FileNotFound` for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            match err {
                CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                CliError::Config(ConfigError::Io(io_err))
                    if io_err.kind() == std::io::ErrorKind::NotFound =>
                {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                other => other,
            }
        })
    }
}
