//! Error types for configuration loading and validation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Config parsing/loading errors
    #[error("config not found")]
    NotFound,

    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid config value for '{field}'{}", hint_suffix(.hint))]
    InvalidValue { field: String, hint: Option<String> },

    #[error("profile '{name}' is not defined")]
    ProfileNotFound { name: String },

    #[error("invalid profile override: {message}")]
    InvalidProfileOverride { message: String },

    #[error("unknown build target '{0}'")]
    UnknownTarget(String),

    // Schema validation errors (no filesystem checks)
    #[error("invalid module specifier {value:?}: {reason}")]
    InvalidSpecifier { value: String, reason: String },

    #[error("manual chunk names cannot be empty")]
    EmptyChunkName,

    #[error("manual chunk '{name}' is declared more than once")]
    DuplicateChunk { name: String },

    #[error("manual chunk '{name}' does not list any modules")]
    EmptyChunk { name: String },

    #[error("module '{specifier}' is assigned to more than one manual chunk: {}", .chunks.join(", "))]
    ModuleInMultipleChunks {
        specifier: String,
        chunks: Vec<String>,
    },

    #[error("dependency '{specifier}' is both included in and excluded from pre-bundling")]
    ConflictingDeps { specifier: String },

    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    // Filesystem validation errors (for CLI use)
    #[error("module not found: {}", .path.display())]
    ModuleNotFound { path: PathBuf },

    #[error("package '{name}' is not installed (searched node_modules from {})", .root.display())]
    PackageNotFound { name: String, root: PathBuf },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Actionable hint for the user, when one is known.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::InvalidValue { hint, .. } | Self::SchemaValidation { hint, .. } => hint.clone(),
            Self::NotFound => {
                Some("Create kiln.toml, kiln.config.json, or a 'kiln' field in package.json".into())
            }
            Self::UnknownTarget(_) => Some(format!(
                "Use one of: {}",
                crate::target::EsTarget::ALL
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            Self::DuplicateChunk { .. } => Some("Merge the duplicate entries into one chunk".into()),
            Self::EmptyChunk { .. } => {
                Some("List at least one module or remove the chunk".into())
            }
            Self::ModuleInMultipleChunks { .. } => {
                Some("Keep each module in exactly one manual chunk".into())
            }
            Self::ConflictingDeps { .. } => {
                Some("Remove the dependency from either 'include' or 'exclude'".into())
            }
            Self::PackageNotFound { .. } => Some("Install the package or fix its name".into()),
            _ => None,
        }
    }
}

fn hint_suffix(hint: &Option<String>) -> String {
    match hint {
        Some(hint) => format!(": {hint}"),
        None => String::new(),
    }
}
