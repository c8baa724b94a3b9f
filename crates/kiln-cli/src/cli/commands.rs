use clap::{Args, Subcommand};
use kiln_config::EsTarget;
use std::path::PathBuf;

use crate::cli::enums::*;
use crate::cli::validation::parse_target;

/// Available Kiln subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the build configuration
    ///
    /// Reports duplicate chunk assignments, empty chunks, conflicting
    /// dependency lists and suspicious settings.
    Check(CheckArgs),

    /// Write a starter configuration
    Init(InitArgs),

    /// Print the resolved configuration
    ///
    /// Shows the configuration after profile and override merging.
    Show(ShowArgs),

    /// Render the configuration for the bundler
    ///
    /// Produces a vite.config.js module (or JSON) from the validated
    /// configuration.
    Emit(EmitArgs),
}

/// Where the configuration comes from and how it is resolved.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to the config file
    ///
    /// If omitted, searches the project root for kiln.toml, kiln.config.json,
    /// then a `kiln` field in package.json.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Profile to apply over the base configuration
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Override build.target
    ///
    /// Takes precedence over KILN_BUILD__TARGET and the config file.
    #[arg(long, value_name = "TARGET", value_parser = parse_target)]
    pub target: Option<EsTarget>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Also check that modules exist and packages are installed
    #[arg(long)]
    pub fs: bool,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write the config into (defaults to the current directory)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Config file format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

#[derive(Args, Debug)]
pub struct EmitArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "js")]
    pub format: EmitFormat,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
