//! Idempotent resource primitives (check + apply pattern).
pub mod symlink;

pub use symlink::LinkResource;

/// Observed state of a link destination at the moment of application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// Destination does not exist, not even as a dangling symlink.
    Missing,
    /// Destination is a symlink resolving to the same underlying file as
    /// the source.
    Correct,
    /// Destination exists but is not the desired link: a regular file, a
    /// directory, a symlink pointing elsewhere, or a dangling symlink.
    Occupied {
        /// Human-readable description of what occupies the destination.
        current: String,
    },
}

/// Result of applying a link directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkChange {
    /// A new symlink was created at the destination.
    Created,
    /// The destination was already the correct link (no change needed).
    AlreadyCorrect,
    /// The destination is occupied by an unrelated entry; nothing was
    /// touched. A deliberate safety property, not an error.
    Conflict {
        /// Description of the occupying entry.
        current: String,
    },
}
