// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed source tree plus an isolated fake
// home directory, with a fluent builder so each integration test can set up
// its environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// An isolated source tree and home directory backed by a [`tempfile::TempDir`].
///
/// Layout:
/// - `<tmp>/tree/` — the root scanned for installable units
/// - `<tmp>/home/` — the fake home directory passed to the engine
///
/// Everything is deleted when the context is dropped.
pub struct IntegrationTestContext {
    tmp: tempfile::TempDir,
    root: PathBuf,
    home: PathBuf,
}

impl IntegrationTestContext {
    /// Create a context with an empty source tree and an empty home.
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = tmp.path().join("tree");
        let home = tmp.path().join("home");
        std::fs::create_dir_all(&root).expect("create tree dir");
        std::fs::create_dir_all(&home).expect("create home dir");
        // Canonicalize so link sources compare cleanly even when the temp
        // directory path itself traverses a symlink.
        let root = std::fs::canonicalize(&root).expect("canonicalize tree dir");
        let home = std::fs::canonicalize(&home).expect("canonicalize home dir");
        Self { tmp, root, home }
    }

    /// Root of the source tree scanned for units.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The fake home directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Absolute path of a file inside a unit's directory.
    pub fn unit_file(&self, unit: &str, rel: &str) -> PathBuf {
        self.root.join(unit).join(rel)
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestTreeBuilder {
    ctx: IntegrationTestContext,
}

impl TestTreeBuilder {
    /// Begin building a new context.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Create a unit directory with the given `install` marker content.
    pub fn with_unit(self, name: &str, install_script: &str) -> Self {
        let dir = self.ctx.root.join(name);
        std::fs::create_dir_all(&dir).expect("create unit dir");
        std::fs::write(dir.join("install"), install_script).expect("write install marker");
        self
    }

    /// Create a plain subdirectory without a marker (not a unit).
    pub fn with_bare_dir(self, name: &str) -> Self {
        std::fs::create_dir_all(self.ctx.root.join(name)).expect("create bare dir");
        self
    }

    /// Write a source file inside a unit's directory.
    pub fn with_unit_file(self, unit: &str, rel: &str, content: &str) -> Self {
        let path = self.ctx.root.join(unit).join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create unit file parent");
        }
        std::fs::write(&path, content).expect("write unit file");
        self
    }

    /// Write a pre-existing file into the fake home directory.
    pub fn with_home_file(self, rel: &str, content: &str) -> Self {
        let path = self.ctx.home.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create home file parent");
        }
        std::fs::write(&path, content).expect("write home file");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}
