//! Module specifiers as they appear in chunk groups and dependency lists.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierKind {
    /// `./x` or `../x`, resolved against the project root.
    Relative,
    /// `/x`
    Absolute,
    /// A package name, optionally scoped and/or with a subpath.
    Bare,
}

/// A validated, non-empty module specifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleSpecifier(String);

impl ModuleSpecifier {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        check(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> SpecifierKind {
        if matches!(self.0.as_str(), "." | "..")
            || self.0.starts_with("./")
            || self.0.starts_with("../")
        {
            SpecifierKind::Relative
        } else if self.0.starts_with('/') {
            SpecifierKind::Absolute
        } else {
            SpecifierKind::Bare
        }
    }

    pub fn is_bare(&self) -> bool {
        self.kind() == SpecifierKind::Bare
    }

    /// Package a bare specifier points into.
    ///
    /// ```
    /// use kiln_config::ModuleSpecifier;
    ///
    /// let spec = ModuleSpecifier::new("three/examples/jsm/controls/OrbitControls.js").unwrap();
    /// assert_eq!(spec.package_name(), Some("three"));
    ///
    /// let scoped = ModuleSpecifier::new("@tweenjs/tween.js/dist/tween.esm.js").unwrap();
    /// assert_eq!(scoped.package_name(), Some("@tweenjs/tween.js"));
    /// ```
    pub fn package_name(&self) -> Option<&str> {
        if !self.is_bare() {
            return None;
        }

        let end = if self.0.starts_with('@') {
            self.0
                .match_indices('/')
                .nth(1)
                .map_or(self.0.len(), |(idx, _)| idx)
        } else {
            self.0.find('/').unwrap_or(self.0.len())
        };
        Some(&self.0[..end])
    }
}

fn check(value: &str) -> Result<()> {
    let invalid = |reason: &str| ConfigError::InvalidSpecifier {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    if value.trim().is_empty() {
        return Err(invalid("specifier cannot be empty"));
    }
    if value.trim() != value {
        return Err(invalid("specifier has leading or trailing whitespace"));
    }
    if value.chars().any(char::is_control) {
        return Err(invalid("specifier contains control characters"));
    }
    if value.starts_with('@') && !value[1..].contains('/') {
        return Err(invalid("scoped package names need the form @scope/name"));
    }

    Ok(())
}

impl FromStr for ModuleSpecifier {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for ModuleSpecifier {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl AsRef<str> for ModuleSpecifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ModuleSpecifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ModuleSpecifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}
