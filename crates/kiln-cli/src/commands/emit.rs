//! Emit command implementation.
//!
//! Renders the configuration in the form the bundler consumes.

use kiln_config::{emit_js, emit_json, validate_schema, KilnConfig};

use crate::cli::{EmitArgs, EmitFormat};
use crate::commands::utils;
use crate::config;
use crate::error::Result;
use crate::ui;

/// Execute the emit command.
///
/// Invalid configurations are refused; run `kiln check` for the full list of
/// problems.
pub async fn execute(args: EmitArgs) -> Result<()> {
    let loaded = config::load(&args.source)?;
    validate_schema(&loaded.config)?;

    let content = render(&loaded.config, args.format);

    match &args.output {
        Some(output) => {
            let path = utils::resolve_path(output, &utils::get_cwd()?);
            utils::write_file(&path, &content).await?;
            ui::success(&format!("Wrote {}", path.display()));
        }
        None => utils::print_stdout(&content)?,
    }

    Ok(())
}

fn render(config: &KilnConfig, format: EmitFormat) -> String {
    match format {
        EmitFormat::Js => emit_js(config),
        EmitFormat::Json => emit_json(config),
    }
}
