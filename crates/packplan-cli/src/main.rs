//! packplan - compose bundler configurations from project declarations.

use clap::Parser;
use packplan_cli::{cli, commands, logger};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet);

    match args.command {
        cli::Command::Print(print_args) => commands::print_execute(print_args),
        cli::Command::Check(check_args) => commands::check_execute(check_args),
    }
}
