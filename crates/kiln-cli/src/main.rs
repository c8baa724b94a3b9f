//! Kiln CLI entry point: argument parsing, logging initialization and
//! command dispatch.

use clap::Parser;
use kiln_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    ui::init_colors(args.no_color);
    logger::init_logger(args.verbose, args.quiet, ui::colors_enabled());

    let result = match args.command {
        cli::Command::Check(check_args) => commands::check_execute(check_args).await,
        cli::Command::Init(init_args) => commands::init_execute(init_args).await,
        cli::Command::Show(show_args) => commands::show_execute(show_args).await,
        cli::Command::Emit(emit_args) => commands::emit_execute(emit_args).await,
    };

    result.map_err(error::cli_error_to_miette)
}
