//! The `install` command: discover units, parse directives, create links.
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::{directives, units};
use crate::error::DotlinkError;
use crate::logging::{LinkStatus, Logger};
use crate::resources::{LinkChange, LinkResource};

/// Counts of per-directive outcomes for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Units discovered beneath the root.
    pub units: usize,
    /// Symlinks newly created.
    pub created: usize,
    /// Destinations that were already the correct link.
    pub already_ok: usize,
    /// Destinations occupied by unrelated entries.
    pub conflicts: usize,
    /// Directives that failed with an I/O error (unreadable marker file or
    /// failed symlink syscall).
    pub failed: usize,
    /// Links that would be created in dry-run mode.
    pub would_create: usize,
}

/// Run the install command.
///
/// # Errors
///
/// Returns an error if the root or home directory cannot be resolved, if
/// the root cannot be listed, or if any directive ended in a conflict or
/// I/O failure (the run itself still completes before this is reported).
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let root = resolve_root(global)?;
    let home = dirs::home_dir().context("cannot determine home directory")?;

    let version = option_env!("DOTLINK_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("dotlink {version}"));
    log.debug(&format!("root: {}", root.display()));

    let stats = install_links(&root, &home, global.dry_run, log)?;
    log.print_summary();

    let problems = stats.conflicts + stats.failed;
    if problems > 0 {
        anyhow::bail!("{problems} link(s) could not be created");
    }
    Ok(())
}

/// Resolve the source tree root from CLI arguments, environment, or the
/// current directory, and canonicalize it so unit paths are absolute.
///
/// # Errors
///
/// Returns an error if the resolved path does not exist.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    let root = if let Some(ref root) = global.root {
        root.clone()
    } else if let Ok(root) = std::env::var("DOTLINK_ROOT") {
        PathBuf::from(root)
    } else {
        std::env::current_dir()?
    };

    std::fs::canonicalize(&root)
        .with_context(|| format!("cannot resolve root directory {}", root.display()))
}

/// The two-stage batch pipeline: discover units beneath `root`, then apply
/// each unit's directives in file-line order, unit by unit.
///
/// Every directive's effect is applied immediately; there is no batching,
/// no deferred application, and no retry. Conflicts and per-directive I/O
/// failures are logged, recorded on `log`, and counted, but never abort
/// the run. In dry-run mode the destination state is still inspected and
/// reported, but nothing is mutated.
///
/// # Errors
///
/// Returns [`DotlinkError::RootUnreadable`] if `root` cannot be listed —
/// the only fatal condition.
pub fn install_links(
    root: &Path,
    home: &Path,
    dry_run: bool,
    log: &Logger,
) -> Result<RunStats, DotlinkError> {
    let units = units::discover(root)?;
    log.info(&format!("installing {} unit(s)", units.len()));

    let mut stats = RunStats {
        units: units.len(),
        ..RunStats::default()
    };

    for unit in &units {
        log.stage(&format!("Unit {}", unit.name()));

        let marker = unit.marker_path();
        let script = match std::fs::read_to_string(&marker) {
            Ok(script) => script,
            Err(source) => {
                let err = DotlinkError::MarkerUnreadable {
                    path: marker,
                    source,
                };
                log.error(&err.to_string());
                log.record_outcome(&unit.name(), LinkStatus::Failed, Some(&err.to_string()));
                stats.failed += 1;
                continue;
            }
        };

        for line in script.lines() {
            let Some(directive) = directives::parse_line(line, &unit.path, home) else {
                if !line.trim().is_empty() {
                    log.debug(&format!("no directive, skipping line: {}", line.trim()));
                }
                continue;
            };
            apply_directive(directive, dry_run, log, &mut stats);
        }
    }

    Ok(stats)
}

/// Apply one directive, logging and recording its outcome.
fn apply_directive(
    directive: directives::Directive,
    dry_run: bool,
    log: &Logger,
    stats: &mut RunStats,
) {
    let resource = LinkResource::from(directive);
    let dest = resource.dest.display().to_string();

    if dry_run {
        preview_directive(&resource, &dest, log, stats);
        return;
    }

    match resource.apply() {
        Ok(LinkChange::Created) => {
            log.info(&format!("linked {}", resource.description()));
            log.record_outcome(&dest, LinkStatus::Created, None);
            stats.created += 1;
        }
        Ok(LinkChange::AlreadyCorrect) => {
            log.info(&format!("already correct: {dest}"));
            log.record_outcome(&dest, LinkStatus::AlreadyCorrect, None);
            stats.already_ok += 1;
        }
        Ok(LinkChange::Conflict { current }) => {
            log.error(&format!("conflict: {dest} is occupied by a {current}"));
            log.record_outcome(&dest, LinkStatus::Conflict, Some(&current));
            stats.conflicts += 1;
        }
        Err(e) => {
            log.error(&e.to_string());
            log.record_outcome(&dest, LinkStatus::Failed, Some(&e.to_string()));
            stats.failed += 1;
        }
    }
}

/// Dry-run variant of [`apply_directive`]: inspect state, report, mutate nothing.
fn preview_directive(resource: &LinkResource, dest: &str, log: &Logger, stats: &mut RunStats) {
    use crate::resources::LinkState;

    match resource.current_state() {
        LinkState::Missing => {
            log.dry_run(&format!("would link {}", resource.description()));
            log.record_outcome(dest, LinkStatus::DryRun, None);
            stats.would_create += 1;
        }
        LinkState::Correct => {
            log.info(&format!("already correct: {dest}"));
            log.record_outcome(dest, LinkStatus::AlreadyCorrect, None);
            stats.already_ok += 1;
        }
        LinkState::Occupied { current } => {
            log.error(&format!("conflict: {dest} is occupied by a {current}"));
            log.record_outcome(dest, LinkStatus::Conflict, Some(&current));
            stats.conflicts += 1;
        }
    }
}
