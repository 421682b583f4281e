//! Domain-specific error types for the symlink installer.
//!
//! Internal modules return the typed [`DotlinkError`] while command handlers
//! at the CLI boundary convert it to [`anyhow::Error`] via the standard `?`
//! operator.
//!
//! Only [`DotlinkError::RootUnreadable`] is fatal to a run. The other
//! variants are reported per unit or per directive and the run continues;
//! an occupied destination is not an error at all but an ordinary
//! [`LinkChange::Conflict`](crate::resources::LinkChange::Conflict) outcome.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by discovery and link application.
#[derive(Error, Debug)]
pub enum DotlinkError {
    /// The root directory does not exist or cannot be listed. Fatal.
    #[error("cannot list root directory {}: {source}", path.display())]
    RootUnreadable {
        /// The root directory that could not be listed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A unit's `install` marker file could not be read after discovery.
    #[error("cannot read install file {}: {source}", path.display())]
    MarkerUnreadable {
        /// Path to the marker file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The symlink syscall itself failed (e.g. missing parent directory).
    #[error("cannot create symlink {}: {source}", dest.display())]
    CreateLink {
        /// Destination path the link was to be created at.
        dest: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn root_unreadable_display() {
        let e = DotlinkError::RootUnreadable {
            path: PathBuf::from("/r"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        };
        let msg = e.to_string();
        assert!(msg.contains("cannot list root directory /r"));
        assert!(msg.contains("no such directory"));
    }

    #[test]
    fn marker_unreadable_display() {
        let e = DotlinkError::MarkerUnreadable {
            path: PathBuf::from("/r/pkg/install"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.to_string().contains("/r/pkg/install"));
        assert!(e.to_string().contains("cannot read install file"));
    }

    #[test]
    fn create_link_display() {
        let e = DotlinkError::CreateLink {
            dest: PathBuf::from("/home/u/.confrc"),
            source: io::Error::new(io::ErrorKind::NotFound, "no parent"),
        };
        assert!(e.to_string().contains("cannot create symlink /home/u/.confrc"));
    }

    #[test]
    fn errors_have_source() {
        use std::error::Error as StdError;
        let e = DotlinkError::RootUnreadable {
            path: PathBuf::from("/r"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(e.source().is_some());
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn error_type_is_send_sync() {
        assert_send_sync::<DotlinkError>();
    }

    #[test]
    fn error_converts_to_anyhow() {
        let e = DotlinkError::CreateLink {
            dest: PathBuf::from("/tmp/x"),
            source: io::Error::new(io::ErrorKind::AlreadyExists, "exists"),
        };
        let _anyhow_err: anyhow::Error = e.into();
    }
}
