//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_modules(&["libs/core"]);
//!     fixture.command().arg("list").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifest;
    pub use super::TestFixture;
}

/// `.gitmodules` text declaring `modules`, in order.
pub fn manifest(modules: &[&str]) -> String {
    modules
        .iter()
        .map(|m| format!("[submodule \"{m}\"]\n\tpath = {m}\n\turl = ../{m}.git\n"))
        .collect()
}

/// A test fixture that provides a temporary repository root.
///
/// The directory is not a git repository; commands that only read the
/// manifest, or that have nothing to do, can run against it directly.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_modules(&["a", "b"])
///     .with_file(".gitbranches", "a develop\n");
///
/// fixture.command().arg("list").assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write a root `.gitmodules` declaring `modules`.
    pub fn with_modules(self, modules: &[&str]) -> Self {
        self.with_file(".gitmodules", &manifest(modules))
    }

    /// Add a `.modsync.yaml` configuration file with the given content.
    #[allow(dead_code)]
    pub fn with_config(self, content: &str) -> Self {
        self.with_file(".modsync.yaml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    ///
    /// Colors are off and the environment cannot redirect the root or the
    /// configuration file.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("modsync");
        cmd.current_dir(self.path())
            .env_remove("MODSYNC_ROOT")
            .env_remove("MODSYNC_CONFIG")
            .env_remove("RUST_LOG")
            .arg("--color")
            .arg("never");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_modules() {
        let fixture = TestFixture::new().with_modules(&["a"]);
        let text = std::fs::read_to_string(fixture.path().join(".gitmodules")).unwrap();
        assert!(text.contains("[submodule \"a\"]"));
    }

    #[test]
    fn test_manifest_keeps_order() {
        let text = manifest(&["b", "a"]);
        assert!(text.find("\"b\"").unwrap() < text.find("\"a\"").unwrap());
    }
}
