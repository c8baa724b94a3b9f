//! Check command implementation.
//!
//! Validates the configuration without emitting anything.

use kiln_config::{report, ConfigValidator, FsValidator, KilnConfig};

use crate::cli::CheckArgs;
use crate::config;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load the config file, apply profile and overrides
/// 2. Collect every schema error and warning
/// 3. Check modules and packages on disk (if --fs)
/// 4. Fail on warnings (if --strict)
pub async fn execute(args: CheckArgs) -> Result<()> {
    let loaded = config::load(&args.source)?;
    ui::info(&format!("Checking {}", loaded.source.display()));

    let report = report(&loaded.config);

    for err in &report.errors {
        ui::error(&err.to_string());
    }
    for warning in &report.warnings {
        ui::warning(&warning.to_string());
    }

    if !report.is_ok() {
        return Err(CliError::ValidationFailed {
            count: report.errors.len(),
        });
    }

    if args.fs {
        ui::info("Checking modules and installed packages...");
        FsValidator::new(&loaded.root).validate(&loaded.config)?;
        ui::success("All modules resolve");
    }

    if args.strict && !report.warnings.is_empty() {
        return Err(CliError::StrictWarnings {
            count: report.warnings.len(),
        });
    }

    ui::info(&summary(&loaded.config));
    ui::success("Configuration is valid!");
    Ok(())
}

fn summary(config: &KilnConfig) -> String {
    let chunks = config.build.manual_chunks();
    let modules: usize = chunks.iter().map(|(_, modules)| modules.len()).sum();
    format!(
        "target {}, {} manual chunk(s) covering {} module(s), {} pre-bundled dependenc{}",
        config.build.target,
        chunks.len(),
        modules,
        config.optimize_deps.include.len(),
        if config.optimize_deps.include.len() == 1 { "y" } else { "ies" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_for_reference() {
        assert_eq!(
            summary(&KilnConfig::reference()),
            "target es2020, 3 manual chunk(s) covering 3 module(s), 1 pre-bundled dependency"
        );
    }

    #[test]
    fn test_summary_for_empty_config() {
        assert_eq!(
            summary(&KilnConfig::default()),
            "target es2020, 0 manual chunk(s) covering 0 module(s), 0 pre-bundled dependencies"
        );
    }
}
