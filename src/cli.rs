//! Command-line surface for the symlink installer.
use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the dotlink installer.
#[derive(Parser, Debug)]
#[command(
    name = "dotlink",
    about = "Declarative dotfile symlink installer",
    version
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared across subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Override the source tree root directory
    #[arg(long, global = true)]
    pub root: Option<std::path::PathBuf>,

    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Discover installable units and create their symlinks
    Install,
    /// Print version information
    Version,
}
