//! Command-line interface definition for Kiln.
//!
//! # Command Structure
//!
//! - `kiln check` - Validate the build configuration
//! - `kiln init` - Write a starter configuration
//! - `kiln show` - Print the resolved configuration
//! - `kiln emit` - Render the configuration for the bundler

mod commands;
pub mod enums;
mod tests;
mod validation;

use clap::Parser;

pub use commands::{CheckArgs, Command, EmitArgs, InitArgs, ShowArgs, SourceArgs};
pub use enums::*;
pub use validation::parse_target;

/// Kiln - typed build configuration for front-end bundlers
#[derive(Parser, Debug)]
#[command(
    name = "kiln",
    version,
    about = "Typed build configuration for front-end bundlers",
    long_about = "Kiln loads, validates and emits the build configuration of a front-end project:\n\
                  the output target, manual code-splitting chunks and pre-bundled dependencies."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}
