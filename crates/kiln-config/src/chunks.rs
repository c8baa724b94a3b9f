//! Manual code-splitting groups.
//!
//! A manual chunk forces a set of modules into one named output bundle
//! instead of leaving them to the bundler's automatic chunking.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, Result};
use crate::specifier::ModuleSpecifier;

/// Chunk name → modules, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualChunks {
    groups: IndexMap<String, Vec<ModuleSpecifier>>,
}

/// A module claimed by more than one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkConflict {
    pub specifier: ModuleSpecifier,
    pub chunks: Vec<String>,
}

impl From<ChunkConflict> for ConfigError {
    fn from(conflict: ChunkConflict) -> Self {
        ConfigError::ModuleInMultipleChunks {
            specifier: conflict.specifier.to_string(),
            chunks: conflict.chunks,
        }
    }
}

impl ManualChunks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new chunk.
    ///
    /// # Errors
    ///
    /// `EmptyChunkName` for a blank name, `DuplicateChunk` if the name is
    /// already declared.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        modules: impl IntoIterator<Item = ModuleSpecifier>,
    ) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::EmptyChunkName);
        }
        if self.groups.contains_key(&name) {
            return Err(ConfigError::DuplicateChunk { name });
        }
        self.groups.insert(name, modules.into_iter().collect());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&[ModuleSpecifier]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ModuleSpecifier])> {
        self.groups
            .iter()
            .map(|(name, modules)| (name.as_str(), modules.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn specifiers(&self) -> impl Iterator<Item = &ModuleSpecifier> {
        self.groups.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// First chunk that lists `specifier`.
    pub fn chunk_for(&self, specifier: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|(_, modules)| modules.iter().any(|m| m.as_str() == specifier))
            .map(|(name, _)| name.as_str())
    }

    /// Every module listed by more than one chunk.
    ///
    /// Each module is reported once, with its owners in declaration order.
    /// A module repeated inside a single chunk is not a conflict.
    pub fn conflicts(&self) -> Vec<ChunkConflict> {
        let mut owners: IndexMap<&ModuleSpecifier, Vec<&str>> = IndexMap::new();
        for (name, modules) in &self.groups {
            for module in modules {
                let entry = owners.entry(module).or_default();
                if !entry.contains(&name.as_str()) {
                    entry.push(name);
                }
            }
        }

        owners
            .into_iter()
            .filter(|(_, chunks)| chunks.len() > 1)
            .map(|(specifier, chunks)| ChunkConflict {
                specifier: specifier.clone(),
                chunks: chunks.into_iter().map(str::to_string).collect(),
            })
            .collect()
    }
}

impl Serialize for ManualChunks {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (name, modules) in &self.groups {
            map.serialize_entry(name, modules)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ManualChunks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(ManualChunksVisitor)
    }
}

struct ManualChunksVisitor;

impl<'de> Visitor<'de> for ManualChunksVisitor {
    type Value = ManualChunks;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of chunk names to module lists")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut chunks = ManualChunks::new();
        while let Some((name, modules)) =
            access.next_entry::<String, Vec<ModuleSpecifier>>()?
        {
            chunks
                .insert(name, modules)
                .map_err(serde::de::Error::custom)?;
        }
        Ok(chunks)
    }
}

impl<'a> IntoIterator for &'a ManualChunks {
    type Item = (&'a String, &'a Vec<ModuleSpecifier>);
    type IntoIter = indexmap::map::Iter<'a, String, Vec<ModuleSpecifier>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(s: &str) -> ModuleSpecifier {
        ModuleSpecifier::new(s).unwrap()
    }

    #[test]
    fn insert_rejects_duplicate_name() {
        let mut chunks = ManualChunks::new();
        chunks.insert("three", [module("three")]).unwrap();
        let err = chunks.insert("three", [module("three/addons")]).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateChunk { ref name } if name == "three"));
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn insert_rejects_blank_name() {
        let mut chunks = ManualChunks::new();
        assert!(matches!(
            chunks.insert("  ", [module("three")]),
            Err(ConfigError::EmptyChunkName)
        ));
    }

    #[test]
    fn preserves_declaration_order() {
        let mut chunks = ManualChunks::new();
        chunks.insert("three", [module("three")]).unwrap();
        chunks.insert("core", [module("./src/core/index.js")]).unwrap();
        chunks
            .insert("components", [module("./src/components/index.js")])
            .unwrap();

        let names: Vec<_> = chunks.names().collect();
        assert_eq!(names, ["three", "core", "components"]);
    }

    #[test]
    fn chunk_for_finds_owner() {
        let mut chunks = ManualChunks::new();
        chunks.insert("core", [module("./src/core/index.js")]).unwrap();
        assert_eq!(chunks.chunk_for("./src/core/index.js"), Some("core"));
        assert_eq!(chunks.chunk_for("three"), None);
    }

    #[test]
    fn conflicts_report_every_owner_once() {
        let mut chunks = ManualChunks::new();
        chunks.insert("vendor", [module("three"), module("gsap")]).unwrap();
        chunks.insert("three", [module("three"), module("three")]).unwrap();
        chunks.insert("anim", [module("gsap")]).unwrap();

        let conflicts = chunks.conflicts();
        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].specifier, module("three"));
        assert_eq!(conflicts[0].chunks, ["vendor", "three"]);
        assert_eq!(conflicts[1].specifier, module("gsap"));
        assert_eq!(conflicts[1].chunks, ["vendor", "anim"]);
    }

    #[test]
    fn repeat_within_one_chunk_is_not_a_conflict() {
        let mut chunks = ManualChunks::new();
        chunks.insert("three", [module("three"), module("three")]).unwrap();
        assert!(chunks.conflicts().is_empty());
    }

    #[test]
    fn deserialize_rejects_duplicate_keys() {
        let err = serde_json::from_str::<ManualChunks>(
            r#"{ "core": ["./a.js"], "core": ["./b.js"] }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("declared more than once"));
    }

    #[test]
    fn deserialize_rejects_invalid_specifier() {
        let err = serde_json::from_str::<ManualChunks>(r#"{ "core": [""] }"#).unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }
}
