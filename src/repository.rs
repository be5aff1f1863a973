//! # Repository Workspace
//!
//! This module provides the `Workspace`, the handle every operation works
//! against: the repository root, the loaded configuration, and the two
//! external collaborators modsync drives.
//!
//! ## Design
//!
//! All version-control work goes through the **`GitOperations`** trait, and
//! dependency installation through [`Installer`]. In the application these are
//! backed by `DefaultGitOperations`, which calls the system `git` via
//! [`crate::git`], and the configured installer command. Tests swap in
//! recording implementations through [`Workspace::with_operations`] so that
//! operations can be checked call by call without a real repository.
//!
//! The root is always explicit. Module paths are resolved against it, never
//! against the process working directory.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;
use crate::git::{IndexEntry, Revision};
use crate::installer::{self, Installer};
use crate::manifest;
use crate::module_name::ModuleName;

/// Trait for git operations - allows mocking in tests
pub trait GitOperations: Send + Sync {
    /// Resolve the commit currently checked out at `dir`.
    fn rev_parse_head(&self, dir: &Path) -> Result<Revision>;

    /// Whether `dir` is an initialized checkout.
    fn is_checkout(&self, dir: &Path) -> bool;

    /// Read the index entry for `path` in the repository at `repo`.
    fn index_entry(&self, repo: &Path, path: &str) -> Result<Option<IndexEntry>>;

    /// Overwrite the index entry for `entry.path` in the repository at `repo`.
    fn update_index(&self, repo: &Path, entry: &IndexEntry) -> Result<()>;

    fn has_commit(&self, dir: &Path, revision: &Revision) -> Result<bool>;

    fn fetch(&self, dir: &Path) -> Result<()>;

    fn checkout_detached(&self, dir: &Path, revision: &Revision) -> Result<()>;

    fn checkout_branch(&self, dir: &Path, branch: &str) -> Result<()>;

    fn submodule_update_init(&self, root: &Path, module: &ModuleName) -> Result<()>;

    fn submodule_sync(&self, root: &Path, module: &ModuleName) -> Result<()>;

    fn submodule_update_remote(&self, root: &Path, module: &ModuleName) -> Result<()>;

    fn submodule_deinit(&self, root: &Path, module: &ModuleName) -> Result<()>;

    /// Discard untracked and ignored content, nested repositories included.
    fn clean_untracked(&self, dir: &Path) -> Result<()>;

    /// Unregister `module` from the index and the manifest.
    fn rm_force(&self, root: &Path, module: &ModuleName) -> Result<()>;

    fn reset_paths(&self, root: &Path, paths: &[&str]) -> Result<()>;

    fn checkout_paths(&self, root: &Path, paths: &[&str]) -> Result<()>;

    /// Delete the module's metadata under `.git/modules`.
    fn remove_module_metadata(&self, root: &Path, module: &ModuleName) -> Result<()>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command to perform real Git operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn rev_parse_head(&self, dir: &Path) -> Result<Revision> {
        crate::git::rev_parse_head(dir)
    }

    fn is_checkout(&self, dir: &Path) -> bool {
        crate::git::is_checkout(dir)
    }

    fn index_entry(&self, repo: &Path, path: &str) -> Result<Option<IndexEntry>> {
        crate::git::ls_files_stage(repo, path)
    }

    fn update_index(&self, repo: &Path, entry: &IndexEntry) -> Result<()> {
        crate::git::update_index_cacheinfo(repo, entry)
    }

    fn has_commit(&self, dir: &Path, revision: &Revision) -> Result<bool> {
        crate::git::has_commit(dir, revision)
    }

    fn fetch(&self, dir: &Path) -> Result<()> {
        crate::git::fetch(dir)
    }

    fn checkout_detached(&self, dir: &Path, revision: &Revision) -> Result<()> {
        crate::git::checkout_detached(dir, revision)
    }

    fn checkout_branch(&self, dir: &Path, branch: &str) -> Result<()> {
        crate::git::checkout_branch(dir, branch)
    }

    fn submodule_update_init(&self, root: &Path, module: &ModuleName) -> Result<()> {
        crate::git::submodule_update_init(root, module)
    }

    fn submodule_sync(&self, root: &Path, module: &ModuleName) -> Result<()> {
        crate::git::submodule_sync(root, module)
    }

    fn submodule_update_remote(&self, root: &Path, module: &ModuleName) -> Result<()> {
        crate::git::submodule_update_remote(root, module)
    }

    fn submodule_deinit(&self, root: &Path, module: &ModuleName) -> Result<()> {
        crate::git::submodule_deinit(root, module)
    }

    fn clean_untracked(&self, dir: &Path) -> Result<()> {
        crate::git::clean_untracked(dir)
    }

    fn rm_force(&self, root: &Path, module: &ModuleName) -> Result<()> {
        crate::git::rm_force(root, module)
    }

    fn reset_paths(&self, root: &Path, paths: &[&str]) -> Result<()> {
        crate::git::reset_paths(root, paths)
    }

    fn checkout_paths(&self, root: &Path, paths: &[&str]) -> Result<()> {
        crate::git::checkout_paths(root, paths)
    }

    fn remove_module_metadata(&self, root: &Path, module: &ModuleName) -> Result<()> {
        crate::git::remove_module_metadata(root, module)
    }
}

/// A repository root together with everything needed to operate on it.
pub struct Workspace {
    root: PathBuf,
    config: Config,
    git_ops: Box<dyn GitOperations>,
    installer: Box<dyn Installer>,
}

impl Workspace {
    /// Creates a `Workspace` that runs the system `git` and the installer
    /// described by `config`.
    pub fn new(root: PathBuf, config: Config) -> Self {
        let installer = installer::from_config(&config.install);
        Self {
            root,
            config,
            git_ops: Box::new(DefaultGitOperations),
            installer,
        }
    }

    /// Creates a `Workspace` with custom `GitOperations` and `Installer`
    /// implementations.
    pub fn with_operations(
        root: PathBuf,
        config: Config,
        git_ops: Box<dyn GitOperations>,
        installer: Box<dyn Installer>,
    ) -> Self {
        Self {
            root,
            config,
            git_ops,
            installer,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn git(&self) -> &dyn GitOperations {
        self.git_ops.as_ref()
    }

    pub fn installer(&self) -> &dyn Installer {
        self.installer.as_ref()
    }

    /// Path of the root manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.config.manifest_path(&self.root)
    }

    /// Modules declared by the root manifest, in declaration order.
    pub fn modules(&self) -> Vec<ModuleName> {
        manifest::read_modules(&self.manifest_path())
    }

    /// Checkout directory of a top-level module.
    pub fn module_dir(&self, module: &ModuleName) -> PathBuf {
        module.path_in(&self.root)
    }
}
