//! Binary entry point for the `dotlink` CLI.
use anyhow::Result;
use clap::Parser;

use dotlink_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let log = logging::Logger::new(args.verbose);

    match args.command {
        cli::Command::Install => commands::install::run(&args.global, &log),
        cli::Command::Version => {
            let version = option_env!("DOTLINK_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("dotlink {version}");
            Ok(())
        }
    }
}
