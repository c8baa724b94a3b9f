use kiln_config::{ConfigDiscovery, ConfigError, KilnConfig};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::cli::SourceArgs;
use crate::commands::utils;
use crate::config::overrides::Overrides;
use crate::error::{Result, ResultExt};

/// A configuration resolved for one command invocation.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: KilnConfig,
    /// File the configuration was read from
    pub source: PathBuf,
    /// Project root that relative module specifiers resolve against
    pub root: PathBuf,
}

/// Load the configuration described by `args`.
///
/// # Errors
///
/// `ConfigError::NotFound` when no file is given and none is discovered,
/// `FileNotFound` when an explicit `--config` path does not exist, and any
/// parse, profile or override error.
pub fn load(args: &SourceArgs) -> Result<LoadedConfig> {
    let cwd = utils::get_cwd()?;
    let root = match &args.cwd {
        Some(dir) => utils::resolve_path(dir, &cwd),
        None => cwd.clone(),
    };
    let discovery = ConfigDiscovery::new(&root);

    let source = match &args.config {
        Some(path) => utils::resolve_path(path, &cwd),
        None => discovery.find().ok_or(ConfigError::NotFound)?,
    };
    info!(path = %source.display(), "using config");

    let mut config = discovery
        .load_from(&source)
        .with_path(&source)?
        .materialize_profile(args.profile.as_deref())?;

    let overrides = Overrides::load(args)?;
    if !overrides.is_empty() {
        debug!("applying overrides");
        overrides.apply(&mut config);
    }

    Ok(LoadedConfig {
        config,
        source,
        root,
    })
}
