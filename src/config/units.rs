//! Unit discovery: find subdirectories carrying an `install` marker file.
use std::path::{Path, PathBuf};

use crate::error::DotlinkError;

/// Name of the marker file that identifies an installable unit.
pub const MARKER_FILE: &str = "install";

/// One installable package of dotfiles.
///
/// Constructed transiently during a single discovery pass and discarded
/// after its directives have been applied; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Absolute path to the unit's root directory.
    pub path: PathBuf,
}

impl Unit {
    /// Path to the unit's `install` marker file.
    #[must_use]
    pub fn marker_path(&self) -> PathBuf {
        self.path.join(MARKER_FILE)
    }

    /// Display name of the unit (its directory name).
    #[must_use]
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }
}

/// Discover all installable units directly beneath `root`.
///
/// A child of `root` is a unit iff `<root>/<child>/install` exists as a
/// regular file at discovery time. The marker check is always performed
/// against the full joined path, so discovery behaves the same no matter
/// which directory the process was invoked from. Entries without the
/// marker (including plain files) are silently excluded.
///
/// Units are returned in directory listing order, which is not guaranteed
/// to be stable across platforms.
///
/// # Errors
///
/// Returns [`DotlinkError::RootUnreadable`] if `root` does not exist or
/// cannot be listed. This is the only fatal error of a run.
pub fn discover(root: &Path) -> Result<Vec<Unit>, DotlinkError> {
    let entries = std::fs::read_dir(root).map_err(|source| DotlinkError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut units = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DotlinkError::RootUnreadable {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.join(MARKER_FILE).is_file() {
            units.push(Unit { path });
        }
    }
    Ok(units)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    /// Create `<root>/<name>/install` with the given content.
    fn make_unit(root: &Path, name: &str, content: &str) {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(MARKER_FILE), content).unwrap();
    }

    #[test]
    fn discover_finds_marked_directories() {
        let tmp = tempfile::tempdir().unwrap();
        make_unit(tmp.path(), "pkgA", "");
        make_unit(tmp.path(), "pkgB", "");

        let units = discover(tmp.path()).unwrap();
        assert_eq!(units.len(), 2);
    }

    #[test]
    fn discover_excludes_unmarked_directories() {
        let tmp = tempfile::tempdir().unwrap();
        make_unit(tmp.path(), "pkgA", "");
        std::fs::create_dir(tmp.path().join("not-a-unit")).unwrap();

        let units = discover(tmp.path()).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].name(), "pkgA");
    }

    #[test]
    fn discover_excludes_plain_files() {
        let tmp = tempfile::tempdir().unwrap();
        make_unit(tmp.path(), "pkgA", "");
        std::fs::write(tmp.path().join("README"), "hello").unwrap();

        let units = discover(tmp.path()).unwrap();
        assert_eq!(units.len(), 1);
    }

    #[test]
    fn discover_excludes_directory_where_marker_is_a_directory() {
        let tmp = tempfile::tempdir().unwrap();
        // install exists but is itself a directory, not a regular file
        std::fs::create_dir_all(tmp.path().join("weird").join(MARKER_FILE)).unwrap();

        let units = discover(tmp.path()).unwrap();
        assert!(units.is_empty());
    }

    #[test]
    fn discover_empty_root_returns_no_units() {
        let tmp = tempfile::tempdir().unwrap();
        let units = discover(tmp.path()).unwrap();
        assert!(units.is_empty());
    }

    #[test]
    fn discover_missing_root_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        let err = discover(&missing).unwrap_err();
        assert!(matches!(err, DotlinkError::RootUnreadable { .. }));
        assert!(err.to_string().contains("cannot list root directory"));
    }

    #[test]
    fn unit_marker_path_and_name() {
        let unit = Unit {
            path: PathBuf::from("/r/pkgA"),
        };
        assert_eq!(unit.marker_path(), PathBuf::from("/r/pkgA/install"));
        assert_eq!(unit.name(), "pkgA");
    }

    #[test]
    fn discovery_count_matches_marked_subset() {
        // N marked + M unmarked => exactly N units
        let tmp = tempfile::tempdir().unwrap();
        for i in 0..3 {
            make_unit(tmp.path(), &format!("marked{i}"), "");
        }
        for i in 0..4 {
            std::fs::create_dir(tmp.path().join(format!("bare{i}"))).unwrap();
        }
        assert_eq!(discover(tmp.path()).unwrap().len(), 3);
    }
}
