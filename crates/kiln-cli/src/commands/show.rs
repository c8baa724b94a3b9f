//! Show command implementation.

use crate::cli::ShowArgs;
use crate::commands::{init, utils};
use crate::config;
use crate::error::Result;

/// Print the resolved configuration to stdout.
pub async fn execute(args: ShowArgs) -> Result<()> {
    let loaded = config::load(&args.source)?;
    let content = init::render(&loaded.config, args.format)?;
    utils::print_stdout(&content)
}
