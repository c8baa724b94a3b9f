//! File-based config discovery for CLI use
//!
//! Handles finding and loading Kiln configuration files from the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::KilnConfig;
use crate::error::{ConfigError, Result};

pub const TOML_CONFIG: &str = "kiln.toml";
pub const JSON_CONFIG: &str = "kiln.config.json";
pub const PACKAGE_JSON: &str = "package.json";

/// File-based configuration discovery
///
/// Searches for Kiln configuration files in conventional locations and loads them.
/// Library users holding a value should use `KilnConfig::from_value()` directly.
///
/// # Example
///
/// ```no_run
/// use kiln_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

#[derive(Deserialize)]
struct PackageJson {
    #[serde(default)]
    kiln: Option<KilnConfig>,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. kiln.toml
    /// 2. kiln.config.json
    /// 3. package.json (kiln field)
    pub fn find(&self) -> Option<PathBuf> {
        for name in [TOML_CONFIG, JSON_CONFIG] {
            let path = self.root.join(name);
            if path.exists() {
                return Some(path);
            }
        }

        let pkg_path = self.root.join(PACKAGE_JSON);
        if pkg_path.exists() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed.get("kiln").is_some_and(|v| !v.is_null()) {
                        return Some(pkg_path);
                    }
                }
            }
        }

        None
    }

    /// Load config from discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<KilnConfig> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        self.load_from(&path)
    }

    pub fn load_with_profile(&self, profile: &str) -> Result<KilnConfig> {
        self.load()?.materialize_profile(Some(profile))
    }

    /// Load config from a specific file path
    ///
    /// The format is chosen by file name: `package.json` reads its `kiln`
    /// field, `.toml` and `.json` files are read whole.
    pub fn load_from(&self, path: &Path) -> Result<KilnConfig> {
        let path = if path.is_relative() {
            self.root.join(path)
        } else {
            path.to_path_buf()
        };
        debug!(path = %path.display(), "loading config");

        if path.file_name() == Some(std::ffi::OsStr::new(PACKAGE_JSON)) {
            return load_from_package_json(&path);
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => KilnConfig::from_toml_str(&fs::read_to_string(&path)?),
            Some("json") => KilnConfig::from_json_str(&fs::read_to_string(&path)?),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

fn load_from_package_json(path: &Path) -> Result<KilnConfig> {
    let content = fs::read_to_string(path)?;

    let parsed: PackageJson =
        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
            field: "package.json".to_string(),
            hint: Some(format!("Invalid JSON: {}", e)),
        })?;

    parsed.kiln.ok_or_else(|| ConfigError::InvalidValue {
        field: "kiln".to_string(),
        hint: Some("Add a non-null 'kiln' field to your package.json".to_string()),
    })
}

/// Discover and load config from current directory (convenience function)
pub fn discover() -> Result<KilnConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}

/// Discover and load config with profile (convenience function)
pub fn discover_with_profile(profile: &str) -> Result<KilnConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load_with_profile(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::EsTarget;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        let discovery = ConfigDiscovery::new(dir.path());
        assert!(discovery.find().is_none());
    }

    #[test]
    fn find_prefers_toml_over_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(TOML_CONFIG), "").unwrap();
        fs::write(dir.path().join(JSON_CONFIG), "{}").unwrap();

        let discovery = ConfigDiscovery::new(dir.path());
        assert_eq!(discovery.find().unwrap(), dir.path().join(TOML_CONFIG));
    }

    #[test]
    fn find_skips_package_json_without_field() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PACKAGE_JSON), r#"{ "name": "app" }"#).unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn load_returns_not_found_when_no_config() {
        let dir = TempDir::new().unwrap();
        let result = ConfigDiscovery::new(dir.path()).load();
        assert!(matches!(result.unwrap_err(), ConfigError::NotFound));
    }

    #[test]
    fn load_parses_toml_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(TOML_CONFIG),
            r#"
[build]
target = "es2020"

[build.rollupOptions.output.manualChunks]
three = ["three"]

[optimizeDeps]
include = ["three"]
"#,
        )
        .unwrap();

        let config = ConfigDiscovery::new(dir.path()).load().unwrap();
        assert_eq!(config.build.target, EsTarget::Es2020);
        assert_eq!(config.build.manual_chunks().chunk_for("three"), Some("three"));
    }

    #[test]
    fn load_from_package_json() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(PACKAGE_JSON),
            r#"{
                "name": "test",
                "kiln": {
                    "build": { "target": "es2022" }
                }
            }"#,
        )
        .unwrap();

        let config = ConfigDiscovery::new(dir.path()).load().unwrap();
        assert_eq!(config.build.target, EsTarget::Es2022);
    }

    #[test]
    fn load_from_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kiln.yaml");
        fs::write(&path, "build: {}").unwrap();

        let err = ConfigDiscovery::new(dir.path()).load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ref ext) if ext == "yaml"));
    }
}
