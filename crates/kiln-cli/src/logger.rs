//! Logging infrastructure for the Kiln CLI.
//!
//! Structured logging via `tracing`. `--verbose` enables debug output for the
//! kiln crates, `--quiet` limits output to errors, and otherwise `RUST_LOG` is
//! honoured with an info-level fallback.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "kiln=debug,kiln_cli=debug,kiln_config=debug";
const QUIET_FILTER: &str = "kiln=error,kiln_cli=error,kiln_config=error";
const DEFAULT_FILTER: &str = "kiln=info,kiln_cli=info,kiln_config=info";

/// Initialize the tracing subscriber with the specified options.
///
/// Call once, before any logging occurs. Log lines go to stderr so that
/// `kiln emit` and `kiln show` output stays pipeable.
/// `color` should come from `ui::colors_enabled` so log lines and status
/// lines agree on `--no-color`, `NO_COLOR` and a redirected stderr.
pub fn init_logger(verbose: bool, quiet: bool, color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), color);
}

/// Initialize logger with custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global subscriber can only be installed once per process, so these
    // only exercise filter construction.

    #[test]
    fn test_verbose_filter_enables_debug() {
        let filter = filter_for(true, false);
        assert!(filter.to_string().contains("kiln_config=debug"));
    }

    #[test]
    fn test_quiet_filter_is_error_only() {
        let filter = filter_for(false, true);
        assert!(filter.to_string().contains("kiln_cli=error"));
    }
}
