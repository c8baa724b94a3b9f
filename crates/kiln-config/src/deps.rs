//! `optimizeDeps` section: dependency pre-bundling.

use serde::{Deserialize, Serialize};

use crate::specifier::ModuleSpecifier;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OptimizeDeps {
    /// Dependencies pre-bundled eagerly, regardless of import discovery
    #[serde(default)]
    pub include: Vec<ModuleSpecifier>,

    /// Dependencies never pre-bundled
    #[serde(default)]
    pub exclude: Vec<ModuleSpecifier>,

    /// Re-run pre-bundling even when the dependency cache is fresh
    #[serde(default)]
    pub force: bool,
}

impl OptimizeDeps {
    pub fn includes(&self, specifier: &str) -> bool {
        self.include.iter().any(|s| s.as_str() == specifier)
    }

    pub fn excludes(&self, specifier: &str) -> bool {
        self.exclude.iter().any(|s| s.as_str() == specifier)
    }

    /// Specifiers listed in both `include` and `exclude`.
    pub fn overlapping(&self) -> impl Iterator<Item = &ModuleSpecifier> {
        self.include.iter().filter(|s| self.excludes(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_include_list() {
        let deps: OptimizeDeps = serde_json::from_value(json!({ "include": ["three"] })).unwrap();
        assert!(deps.includes("three"));
        assert!(!deps.excludes("three"));
        assert!(!deps.force);
    }

    #[test]
    fn finds_overlap() {
        let deps: OptimizeDeps = serde_json::from_value(json!({
            "include": ["three", "gsap"],
            "exclude": ["gsap"]
        }))
        .unwrap();
        let overlap: Vec<_> = deps.overlapping().map(ModuleSpecifier::as_str).collect();
        assert_eq!(overlap, ["gsap"]);
    }
}
