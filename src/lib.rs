//! Declarative dotfile symlink installer.
//!
//! Scans a source tree for installable units (subdirectories containing an
//! `install` marker file), parses each marker file's `link A to B`
//! directives, and creates the corresponding symlinks into the user's home
//! directory — idempotently and without ever overwriting existing files.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]** — unit discovery and directive parsing
//! - **[`resources`]** — the idempotent `check + apply` symlink primitive
//! - **[`commands`]** — top-level subcommand orchestration (`install`)
//! - **[`logging`]** — leveled console output and outcome summary
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod resources;
