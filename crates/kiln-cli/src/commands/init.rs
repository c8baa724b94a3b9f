//! Init command implementation.
//!
//! Writes the starter configuration into a project directory.

use kiln_config::{discovery, KilnConfig};
use std::path::Path;
use tracing::debug;

use crate::cli::{ConfigFormat, InitArgs};
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the init command.
///
/// # Errors
///
/// Returns `AlreadyExists` when the target file exists and `--force` was
/// not given.
pub async fn execute(args: InitArgs) -> Result<()> {
    let cwd = utils::get_cwd()?;
    let dir = match &args.dir {
        Some(dir) => utils::resolve_path(dir, &cwd),
        None => cwd,
    };
    let path = dir.join(args.format.file_name());

    if tokio::fs::try_exists(&path).await? && !args.force {
        return Err(CliError::AlreadyExists(path));
    }

    let content = render(&KilnConfig::reference(), args.format)?;
    utils::write_file(&path, &content).await?;
    debug!(path = %path.display(), "wrote starter config");
    ui::success(&format!("Created {}", path.display()));

    if let Some(shadowing) = shadowing_config(&dir, args.format) {
        ui::warning(&format!(
            "{} also exists and is picked up first during discovery",
            shadowing
        ));
    }

    Ok(())
}

pub(crate) fn render(config: &KilnConfig, format: ConfigFormat) -> Result<String> {
    let mut content = match format {
        ConfigFormat::Toml => config.to_toml_string()?,
        ConfigFormat::Json => config.to_json_string()?,
    };
    if !content.ends_with('\n') {
        content.push('\n');
    }
    Ok(content)
}

/// A config file that discovery would prefer over the one just written.
fn shadowing_config(dir: &Path, written: ConfigFormat) -> Option<&'static str> {
    match written {
        ConfigFormat::Json if dir.join(discovery::TOML_CONFIG).exists() => {
            Some(discovery::TOML_CONFIG)
        }
        _ => None,
    }
}
