//! Pluggable config validation strategies
//!
//! Separates filesystem validation (for CLI use) from schema validation (for library use).

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::KilnConfig;
use crate::error::{ConfigError, Result};
use crate::specifier::{ModuleSpecifier, SpecifierKind};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &KilnConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use kiln_config::{ConfigValidator, KilnConfig, SchemaValidator};
///
/// SchemaValidator.validate(&KilnConfig::reference()).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &KilnConfig) -> Result<()> {
        match schema_errors(config).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn schema_errors(config: &KilnConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    let chunks = config.build.manual_chunks();

    for (name, modules) in chunks.iter() {
        if name.trim().is_empty() {
            errors.push(ConfigError::EmptyChunkName);
        }
        if modules.is_empty() {
            errors.push(ConfigError::EmptyChunk {
                name: name.to_string(),
            });
        }
    }

    errors.extend(chunks.conflicts().into_iter().map(ConfigError::from));

    // Specifiers built through the public constructors are always valid, but
    // fields are public and may have been assembled by hand.
    let deps = &config.optimize_deps;
    for spec in chunks
        .specifiers()
        .chain(deps.include.iter())
        .chain(deps.exclude.iter())
    {
        if let Err(err) = ModuleSpecifier::new(spec.as_str()) {
            errors.push(err);
        }
    }

    errors.extend(deps.overlapping().map(|spec| ConfigError::ConflictingDeps {
        specifier: spec.to_string(),
    }));

    if config.build.chunk_size_warning_limit == 0 {
        errors.push(ConfigError::SchemaValidation {
            message: "chunkSizeWarningLimit must be greater than 0".to_string(),
            hint: Some("Use the default of 500 (kB) or a larger value".to_string()),
        });
    }

    errors
}

/// Filesystem validator (for CLI use)
///
/// Runs schema validation, then checks that path specifiers in manual chunks
/// exist under `root` and that bare specifiers resolve to an installed
/// package in `node_modules` of `root` or one of its ancestors.
///
/// # Example
///
/// ```no_run
/// use kiln_config::{ConfigValidator, FsValidator, KilnConfig};
///
/// FsValidator::new(".").validate(&KilnConfig::reference()).unwrap();
/// ```
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn check_module(&self, spec: &ModuleSpecifier) -> Result<()> {
        match spec.kind() {
            SpecifierKind::Relative | SpecifierKind::Absolute => {
                // `/src/main.js` is served from the project root, not the filesystem root.
                let path = self.root.join(spec.as_str().trim_start_matches('/'));
                if !path.exists() {
                    return Err(ConfigError::ModuleNotFound { path });
                }
            }
            SpecifierKind::Bare => self.check_package(spec)?,
        }
        Ok(())
    }

    fn check_package(&self, spec: &ModuleSpecifier) -> Result<()> {
        let Some(name) = spec.package_name() else {
            return Ok(());
        };

        match find_package(&self.root, name) {
            Some(dir) => {
                debug!(package = name, dir = %dir.display(), "resolved package");
                Ok(())
            }
            None => Err(ConfigError::PackageNotFound {
                name: name.to_string(),
                root: self.root.clone(),
            }),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &KilnConfig) -> Result<()> {
        SchemaValidator.validate(config)?;

        for spec in config.build.manual_chunks().specifiers() {
            self.check_module(spec)?;
        }

        for spec in config.optimize_deps.include.iter().filter(|s| s.is_bare()) {
            self.check_package(spec)?;
        }

        Ok(())
    }
}

/// Node-style lookup of `node_modules/<name>` from `root` upwards.
fn find_package(root: &Path, name: &str) -> Option<PathBuf> {
    root.ancestors()
        .map(|dir| dir.join("node_modules").join(name))
        .find(|candidate| candidate.is_dir())
}

/// Non-fatal finding reported alongside errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// A path was listed for pre-bundling, which only applies to dependencies
    PathInOptimizeDeps { specifier: String },
    /// A chunk name that reads like a module path
    PathLikeChunkName { name: String },
    /// A package split into its own chunk but left out of pre-bundling while
    /// other packages are pre-bundled
    ChunkedPackageNotPrebundled { package: String, chunk: String },
    /// Manual chunks are emitted as ES modules, which the target cannot load
    TargetWithoutModules { target: String },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathInOptimizeDeps { specifier } => write!(
                f,
                "optimizeDeps.include lists the path '{specifier}'; only dependencies are pre-bundled"
            ),
            Self::PathLikeChunkName { name } => write!(
                f,
                "manual chunk name '{name}' looks like a module path and may collide with one"
            ),
            Self::ChunkedPackageNotPrebundled { package, chunk } => write!(
                f,
                "package '{package}' has its own chunk '{chunk}' but is not in optimizeDeps.include"
            ),
            Self::TargetWithoutModules { target } => write!(
                f,
                "target '{target}' predates ES modules; manual chunks require es2015 or later"
            ),
        }
    }
}

/// Every problem found in a configuration.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Collect all schema errors and warnings instead of stopping at the first.
///
/// # Example
///
/// ```
/// use kiln_config::{report, KilnConfig};
///
/// let report = report(&KilnConfig::reference());
/// assert!(report.is_clean());
/// ```
pub fn report(config: &KilnConfig) -> ValidationReport {
    let report = ValidationReport {
        errors: schema_errors(config),
        warnings: warnings(config),
    };

    debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "collected validation report"
    );

    report
}

fn warnings(config: &KilnConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let chunks = config.build.manual_chunks();
    let deps = &config.optimize_deps;

    for spec in deps.include.iter().filter(|s| !s.is_bare()) {
        warnings.push(ValidationWarning::PathInOptimizeDeps {
            specifier: spec.to_string(),
        });
    }

    for name in chunks.names() {
        if name.contains('/') || name.ends_with(".js") {
            warnings.push(ValidationWarning::PathLikeChunkName {
                name: name.to_string(),
            });
        }
    }

    let prebundles_packages = deps.include.iter().any(ModuleSpecifier::is_bare);
    if prebundles_packages {
        for (chunk, modules) in chunks.iter() {
            let mut seen = Vec::new();
            for package in modules.iter().filter_map(ModuleSpecifier::package_name) {
                if seen.contains(&package) {
                    continue;
                }
                seen.push(package);
                let listed = deps
                    .include
                    .iter()
                    .any(|inc| inc.package_name() == Some(package));
                if !listed && !deps.excludes(package) {
                    warnings.push(ValidationWarning::ChunkedPackageNotPrebundled {
                        package: package.to_string(),
                        chunk: chunk.to_string(),
                    });
                }
            }
        }
    }

    if !chunks.is_empty() && !config.build.target.supports_modules() {
        warnings.push(ValidationWarning::TargetWithoutModules {
            target: config.build.target.to_string(),
        });
    }

    warnings
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &KilnConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
pub fn validate_fs(config: &KilnConfig, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}
