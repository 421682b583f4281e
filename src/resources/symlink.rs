//! Symlink resource: non-destructive check + apply for one link directive.
use std::path::{Path, PathBuf};

use super::{LinkChange, LinkState};
use crate::config::directives::Directive;
use crate::error::DotlinkError;

/// A desired symlink that can be checked and applied.
///
/// Applying never removes or replaces an existing filesystem entry: an
/// occupied destination is reported as a [`LinkChange::Conflict`] and left
/// untouched. The only mutation this resource ever performs is a single
/// symlink creation when the destination is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkResource {
    /// The file or directory the symlink should point to.
    pub source: PathBuf,
    /// The path at which the symlink should exist.
    pub dest: PathBuf,
}

impl LinkResource {
    /// Create a new link resource.
    #[must_use]
    pub const fn new(source: PathBuf, dest: PathBuf) -> Self {
        Self { source, dest }
    }

    /// Human-readable description of this link.
    #[must_use]
    pub fn description(&self) -> String {
        format!("{} -> {}", self.dest.display(), self.source.display())
    }

    /// Check the current state of the destination path.
    ///
    /// The presence check is non-dereferencing, so a dangling symlink at
    /// the destination counts as present and therefore as
    /// [`LinkState::Occupied`] — it is never silently overwritten.
    /// "Same underlying file" means device+inode identity on Unix and a
    /// (weaker) canonicalized-path comparison elsewhere.
    #[must_use]
    pub fn current_state(&self) -> LinkState {
        if std::fs::symlink_metadata(&self.dest).is_err() {
            return LinkState::Missing;
        }
        if same_file(&self.source, &self.dest) {
            return LinkState::Correct;
        }
        LinkState::Occupied {
            current: describe(&self.dest),
        }
    }

    /// Ensure the destination is a symlink to the source.
    ///
    /// At most one filesystem mutation (the symlink creation) is performed,
    /// and only when the destination is absent. A correct link is a no-op;
    /// an occupied destination yields [`LinkChange::Conflict`] without
    /// touching anything.
    ///
    /// There is an unavoidable window between the state check and the
    /// symlink syscall; the tool assumes it is the sole writer to its
    /// destination paths during a run.
    ///
    /// # Errors
    ///
    /// Returns [`DotlinkError::CreateLink`] if the symlink syscall fails,
    /// e.g. when the destination's parent directory does not exist.
    pub fn apply(&self) -> Result<LinkChange, DotlinkError> {
        match self.current_state() {
            LinkState::Correct => Ok(LinkChange::AlreadyCorrect),
            LinkState::Occupied { current } => Ok(LinkChange::Conflict { current }),
            LinkState::Missing => {
                create_symlink(&self.source, &self.dest).map_err(|source| {
                    DotlinkError::CreateLink {
                        dest: self.dest.clone(),
                        source,
                    }
                })?;
                Ok(LinkChange::Created)
            }
        }
    }
}

impl From<Directive> for LinkResource {
    fn from(directive: Directive) -> Self {
        Self::new(directive.source, directive.dest)
    }
}

/// Whether `a` and `b` refer to the same underlying file, following
/// symlinks. Either path failing to resolve counts as "not the same", so a
/// missing source never brings down the run.
#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt as _;
    match (std::fs::metadata(a), std::fs::metadata(b)) {
        (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
        _ => false,
    }
}

/// Weaker fallback for platforms without inode identity: compare
/// canonicalized absolute paths.
#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}

/// Describe what occupies a destination path, for conflict reporting.
fn describe(path: &Path) -> String {
    if let Ok(target) = std::fs::read_link(path) {
        if std::fs::metadata(path).is_ok() {
            format!("symlink to {}", target.display())
        } else {
            format!("dangling symlink to {}", target.display())
        }
    } else {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_dir() => "directory".to_string(),
            _ => "regular file".to_string(),
        }
    }
}

/// Create a symlink at `dest` pointing to `source` (platform-specific).
fn create_symlink(source: &Path, dest: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(source, dest)
    }

    #[cfg(windows)]
    {
        if source.is_dir() {
            std::os::windows::fs::symlink_dir(source, dest)
        } else {
            std::os::windows::fs::symlink_file(source, dest)
        }
    }
}
