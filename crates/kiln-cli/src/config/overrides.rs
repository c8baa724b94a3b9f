use figment::{
    providers::{Env, Serialized},
    Figment,
};
use kiln_config::{EsTarget, KilnConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::cli::SourceArgs;
use crate::error::Result;

/// Environment variable prefix; nested keys are separated by `__`,
/// e.g. `KILN_BUILD__TARGET`.
pub const ENV_PREFIX: &str = "KILN_";

/// Scalar settings that may be overridden from the environment or flags.
///
/// Keys are lowercase because the environment provider lowercases them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overrides {
    #[serde(default)]
    pub build: BuildOverrides,

    #[serde(default, rename = "optimizedeps")]
    pub optimize_deps: DepsOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<EsTarget>,

    #[serde(default, rename = "outdir", skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sourcemap: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minify: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepsOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

impl Overrides {
    /// Merge environment variables and command-line flags.
    pub fn load(args: &SourceArgs) -> Result<Self> {
        Self::from_figment(Figment::new().merge(Env::prefixed(ENV_PREFIX).split("__")), args)
    }

    fn from_figment(figment: Figment, args: &SourceArgs) -> Result<Self> {
        let overrides = figment
            .merge(Serialized::defaults(Self::from_args(args)))
            .extract::<Self>()?;
        debug!(?overrides, "resolved overrides");
        Ok(overrides)
    }

    fn from_args(args: &SourceArgs) -> Self {
        Self {
            build: BuildOverrides {
                target: args.target,
                ..BuildOverrides::default()
            },
            optimize_deps: DepsOverrides::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, config: &mut KilnConfig) {
        let build = &mut config.build;
        if let Some(target) = self.build.target {
            build.target = target;
        }
        if let Some(out_dir) = &self.build.out_dir {
            build.out_dir = out_dir.clone();
        }
        if let Some(sourcemap) = self.build.sourcemap {
            build.sourcemap = sourcemap;
        }
        if let Some(minify) = self.build.minify {
            build.minify = minify;
        }
        if let Some(force) = self.optimize_deps.force {
            config.optimize_deps.force = force;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_values_are_applied() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("KILN_BUILD__TARGET", "es2022");
            jail.set_env("KILN_BUILD__SOURCEMAP", "true");
            jail.set_env("KILN_OPTIMIZEDEPS__FORCE", "true");

            let overrides = Overrides::load(&SourceArgs::default()).expect("overrides");
            assert_eq!(overrides.build.target, Some(EsTarget::Es2022));
            assert_eq!(overrides.build.sourcemap, Some(true));
            assert_eq!(overrides.optimize_deps.force, Some(true));

            let mut config = KilnConfig::reference();
            overrides.apply(&mut config);
            assert_eq!(config.build.target, EsTarget::Es2022);
            assert!(config.build.sourcemap);
            assert!(config.optimize_deps.force);
            Ok(())
        });
    }

    #[test]
    fn flag_beats_environment() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("KILN_BUILD__TARGET", "es2022");
            let args = SourceArgs {
                target: Some(EsTarget::Es2015),
                ..SourceArgs::default()
            };

            let overrides = Overrides::load(&args).expect("overrides");
            assert_eq!(overrides.build.target, Some(EsTarget::Es2015));
            Ok(())
        });
    }

    #[test]
    fn invalid_env_target_is_error() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("KILN_BUILD__TARGET", "es1999");
            assert!(Overrides::load(&SourceArgs::default()).is_err());
            Ok(())
        });
    }

    #[test]
    fn no_overrides_leave_config_untouched() {
        let overrides = Overrides::default();
        assert!(overrides.is_empty());

        let mut config = KilnConfig::reference();
        overrides.apply(&mut config);
        assert_eq!(config, KilnConfig::reference());
    }
}
