//! Top-level configuration record and profile merging.
//!
//! For file discovery, see the `discovery` module.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::build::BuildOptions;
use crate::deps::OptimizeDeps;
use crate::error::{ConfigError, Result as ConfigResult};
use crate::specifier::ModuleSpecifier;
use crate::target::EsTarget;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct KilnConfig {
    #[serde(default)]
    pub build: BuildOptions,

    #[serde(default)]
    pub optimize_deps: OptimizeDeps,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub profiles: IndexMap<String, ProfileConfig>,
}

/// Partial overrides applied over the base sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileConfig {
    #[serde(
        default,
        deserialize_with = "unique_keys",
        skip_serializing_if = "Value::is_null"
    )]
    pub build: Value,

    #[serde(
        default,
        deserialize_with = "unique_keys",
        skip_serializing_if = "Value::is_null"
    )]
    pub optimize_deps: Value,
}

/// Profile sections stay untyped until merged, but a repeated key must not
/// silently replace the earlier one.
fn unique_keys<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Value, D::Error> {
    UniqueKeys { chunks: false }.deserialize(deserializer)
}

/// Builds a `Value`, failing on the first key seen twice in one map.
/// `chunks` is set while reading the body of `manualChunks`.
#[derive(Clone, Copy)]
struct UniqueKeys {
    chunks: bool,
}

impl<'de> DeserializeSeed<'de> for UniqueKeys {
    type Value = Value;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for UniqueKeys {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a profile section")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<Value, D::Error> {
        self.deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element_seed(UniqueKeys { chunks: false })? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Value, A::Error> {
        let mut object = Map::new();
        while let Some(key) = access.next_key::<String>()? {
            if object.contains_key(&key) {
                let message = if self.chunks {
                    ConfigError::DuplicateChunk { name: key }.to_string()
                } else {
                    format!("key '{key}' is declared more than once")
                };
                return Err(de::Error::custom(message));
            }
            let value = access.next_value_seed(UniqueKeys {
                chunks: key == "manualChunks",
            })?;
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }
}

impl KilnConfig {
    /// The canonical three.js application layout.
    ///
    /// Targets ES2020, splits `three`, the core module and the component
    /// library into their own chunks, and pre-bundles `three`.
    pub fn reference() -> Self {
        let spec = |s: &str| ModuleSpecifier::new(s).expect("reference specifiers are valid");

        let mut config = Self::default().with_target(EsTarget::Es2020);
        let chunks = config.build.manual_chunks_mut();
        for (name, module) in [
            ("three", "three"),
            ("core", "./src/core/index.js"),
            ("components", "./src/components/index.js"),
        ] {
            chunks
                .insert(name, [spec(module)])
                .expect("reference chunk names are unique");
        }
        config.optimize_deps.include.push(spec("three"));
        config
    }

    pub fn with_target(mut self, target: EsTarget) -> Self {
        self.build.target = target;
        self
    }

    /// Add a manual chunk.
    ///
    /// # Example
    ///
    /// ```
    /// use kiln_config::KilnConfig;
    ///
    /// let config = KilnConfig::default()
    ///     .with_manual_chunk("vendor", ["three", "gsap"])
    ///     .unwrap();
    /// assert_eq!(config.build.manual_chunks().chunk_for("gsap"), Some("vendor"));
    /// ```
    pub fn with_manual_chunk<I, S>(mut self, name: impl Into<String>, modules: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let modules = modules
            .into_iter()
            .map(|m| ModuleSpecifier::new(m.as_ref()))
            .collect::<ConfigResult<Vec<_>>>()?;
        self.build.manual_chunks_mut().insert(name, modules)?;
        Ok(self)
    }

    pub fn with_include(mut self, specifier: impl AsRef<str>) -> ConfigResult<Self> {
        self.optimize_deps
            .include
            .push(ModuleSpecifier::new(specifier.as_ref())?);
        Ok(self)
    }
}

impl KilnConfig {
    /// Create from serde_json::Value (for programmatic config from DB/API)
    ///
    /// # Example
    ///
    /// ```
    /// use kiln_config::{EsTarget, KilnConfig};
    /// use serde_json::json;
    ///
    /// let value = json!({
    ///     "build": { "target": "es2020" },
    ///     "optimizeDeps": { "include": ["three"] }
    /// });
    ///
    /// let config = KilnConfig::from_value(value).unwrap();
    /// assert_eq!(config.build.target, EsTarget::Es2020);
    /// assert!(config.optimize_deps.includes("three"));
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::InvalidValue {
            field: "json".to_string(),
            hint: Some(format!("Invalid JSON config: {}", e)),
        })
    }

    pub fn to_json_string(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "json".to_string(),
            hint: Some(e.to_string()),
        })
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: Some(format!("Invalid TOML config: {}", e)),
        })
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: Some(e.to_string()),
        })
    }
}

impl KilnConfig {
    /// Apply the named profile over the base configuration.
    ///
    /// Objects merge key by key; arrays and scalars replace. `None` returns
    /// the configuration unchanged.
    pub fn materialize_profile(mut self, profile: Option<&str>) -> ConfigResult<Self> {
        let Some(name) = profile else {
            return Ok(self);
        };

        let profile_cfg = self
            .profiles
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.to_string(),
            })?;

        debug!(profile = name, "applying config profile");

        if !profile_cfg.build.is_null() {
            self.build = merge_section(&self.build, &profile_cfg.build)?;
        }
        if !profile_cfg.optimize_deps.is_null() {
            self.optimize_deps = merge_section(&self.optimize_deps, &profile_cfg.optimize_deps)?;
        }

        Ok(self)
    }

    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

fn merge_section<T>(base: &T, overrides: &Value) -> ConfigResult<T>
where
    T: Serialize + serde::de::DeserializeOwned,
{
    let mut merged =
        serde_json::to_value(base).map_err(|err| ConfigError::InvalidProfileOverride {
            message: err.to_string(),
        })?;
    merge_values(&mut merged, overrides);
    serde_json::from_value(merged).map_err(|err| ConfigError::InvalidProfileOverride {
        message: err.to_string(),
    })
}

fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}
