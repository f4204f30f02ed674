//! Centrifuge CLI entry point.
//!
//! Parses arguments, loads layered configuration, initializes logging and
//! dispatches to the selected command.

use centrifuge_cli::{cli, commands, error, logger};
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Config is loaded before logging so that `settings.log_level` applies;
    // a load failure is reported once the logger is up.
    let config = commands::load_config(args.config.as_deref());
    let settings = config
        .as_ref()
        .map(|c| c.settings.clone())
        .unwrap_or_default();
    logger::init_logger(args.verbose, args.quiet, args.no_color, &settings);

    let result = config.and_then(|config| {
        let context = commands::Context::new(config, args.pretty);
        commands::execute(args.command, &context)
    });

    result.map_err(error::cli_error_to_miette)
}
