//! Top-level subcommand orchestration.
pub mod install;
