//! Leveled console output and per-directive outcome summary.
use std::cell::RefCell;
use std::fs;
use std::io::Write as _;
use std::path::PathBuf;

/// Outcome of applying a single link directive, for summary reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// A new symlink was created.
    Created,
    /// The destination was already the correct symlink.
    AlreadyCorrect,
    /// The destination is occupied by an unrelated filesystem entry.
    Conflict,
    /// An I/O error prevented the directive from being applied.
    Failed,
    /// Dry-run mode: the link would have been created.
    DryRun,
}

/// A recorded per-directive outcome.
#[derive(Debug, Clone)]
pub struct OutcomeEntry {
    /// Destination path the directive targeted.
    pub dest: String,
    /// Final status of the directive.
    pub status: LinkStatus,
    /// Optional detail (e.g. what occupies a conflicting destination).
    pub detail: Option<String>,
}

/// Structured logger with verbosity gating and outcome collection.
///
/// Constructed once at process start from the `--verbose` flag and passed
/// into the core explicitly; the core never talks to a global sink. All
/// messages are also written to a persistent log file at
/// `$XDG_CACHE_HOME/dotlink/install.log` (default `~/.cache/dotlink/install.log`)
/// with timestamps and ANSI codes stripped, regardless of the verbose flag.
#[derive(Debug)]
pub struct Logger {
    verbose: bool,
    outcomes: RefCell<Vec<OutcomeEntry>>,
    log_file: Option<PathBuf>,
}

/// Return the log file path under `$XDG_CACHE_HOME/dotlink/` (or `~/.cache/dotlink/`).
fn log_file_path() -> Option<PathBuf> {
    let cache_dir = std::env::var("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".cache")
        });
    let dir = cache_dir.join("dotlink");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join("install.log"))
}

/// Strip ANSI escape sequences from a string.
fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until 'm' (end of SGR sequence)
            for inner in chars.by_ref() {
                if inner == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

impl Logger {
    /// Create a logger, truncating the persistent log file for a fresh run.
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        let log_file = log_file_path();

        if let Some(ref path) = log_file {
            let version = option_env!("DOTLINK_VERSION")
                .unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
            let header = format!(
                "==========================================\n\
                 dotlink {version} {}\n\
                 ==========================================\n",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            );
            let _ = fs::write(path, header);
        }

        Self {
            verbose,
            outcomes: RefCell::new(Vec::new()),
            log_file,
        }
    }

    /// Append a line to the persistent log file.
    fn write_to_file(&self, level: &str, msg: &str) {
        if let Some(ref path) = self.log_file
            && let Ok(mut f) = fs::OpenOptions::new().append(true).open(path)
        {
            let ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            let clean = strip_ansi(msg);
            let _ = writeln!(f, "{ts} {level} {clean}");
        }
    }

    /// Return the log file path, if available.
    #[cfg(test)]
    pub fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Emit an error-level message (always shown, on stderr).
    pub fn error(&self, msg: &str) {
        eprintln!("\x1b[31mERROR\x1b[0m {msg}");
        self.write_to_file("ERR", msg);
    }

    /// Emit a warning-level message (always shown, on stderr).
    pub fn warn(&self, msg: &str) {
        eprintln!("\x1b[33mWARN\x1b[0m  {msg}");
        self.write_to_file("WRN", msg);
    }

    /// Emit a stage heading (always shown).
    pub fn stage(&self, msg: &str) {
        println!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m");
        self.write_to_file("STG", msg);
    }

    /// Emit an informational message (always shown).
    pub fn info(&self, msg: &str) {
        println!("  {msg}");
        self.write_to_file("INF", msg);
    }

    /// Emit a debug message (shown only with `--verbose`).
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            println!("  \x1b[2m{msg}\x1b[0m");
        }
        // Always log debug to file, even when not verbose on terminal
        self.write_to_file("DBG", msg);
    }

    /// Emit a dry-run message (always shown).
    pub fn dry_run(&self, msg: &str) {
        println!("  \x1b[33m[DRY RUN]\x1b[0m {msg}");
        self.write_to_file("DRY", msg);
    }

    /// Record a per-directive outcome for the summary.
    pub fn record_outcome(&self, dest: &str, status: LinkStatus, detail: Option<&str>) {
        self.outcomes.borrow_mut().push(OutcomeEntry {
            dest: dest.to_string(),
            status,
            detail: detail.map(String::from),
        });
    }

    /// Number of recorded conflicts.
    #[must_use]
    pub fn conflict_count(&self) -> usize {
        self.outcomes
            .borrow()
            .iter()
            .filter(|o| o.status == LinkStatus::Conflict)
            .count()
    }

    /// Number of recorded I/O failures.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.outcomes
            .borrow()
            .iter()
            .filter(|o| o.status == LinkStatus::Failed)
            .count()
    }

    /// Print the summary of all recorded outcomes.
    pub fn print_summary(&self) {
        let outcomes = self.outcomes.borrow();
        if outcomes.is_empty() {
            return;
        }

        println!();
        self.stage("Summary");

        let mut created = 0u32;
        let mut already_ok = 0u32;
        let mut conflicts = 0u32;
        let mut failed = 0u32;
        let mut dry_run = 0u32;

        for outcome in outcomes.iter() {
            let (icon, color) = match outcome.status {
                LinkStatus::Created => {
                    created += 1;
                    ("✓", "\x1b[32m")
                }
                LinkStatus::AlreadyCorrect => {
                    already_ok += 1;
                    ("·", "\x1b[2m")
                }
                LinkStatus::Conflict => {
                    conflicts += 1;
                    ("✗", "\x1b[31m")
                }
                LinkStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
                LinkStatus::DryRun => {
                    dry_run += 1;
                    ("~", "\x1b[33m")
                }
            };

            let suffix = match &outcome.detail {
                Some(detail) => format!(" ({detail})"),
                None => String::new(),
            };

            let line = format!("{icon} {}{suffix}", outcome.dest);
            println!("  {color}{line}\x1b[0m");
            self.write_to_file("INF", &line);
        }

        println!();
        let total = created + already_ok + conflicts + failed + dry_run;
        let totals = format!(
            "{total} links: {created} created, {already_ok} already ok, {conflicts} conflicts, {failed} failed, {dry_run} dry-run"
        );
        println!(
            "  {total} links: \x1b[32m{created} created\x1b[0m, {already_ok} already ok, \x1b[31m{conflicts} conflicts\x1b[0m, \x1b[31m{failed} failed\x1b[0m, {dry_run} dry-run"
        );
        self.write_to_file("INF", &totals);

        if let Some(path) = &self.log_file {
            println!("  \x1b[2mlog: {}\x1b[0m", path.display());
            self.write_to_file("INF", &format!("log: {}", path.display()));
        }
    }
}
