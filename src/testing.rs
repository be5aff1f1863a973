//! Test doubles shared by the operation and propagation tests.
//!
//! `RecordingGit` implements [`GitOperations`] against an in-memory model of
//! checkouts, heads and index entries, and records every call in order.
//! `RecordingInstaller` records into the same log so tests can assert on the
//! interleaving of git steps and installs.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tempfile::TempDir;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::git::{FileMode, IndexEntry, Revision};
use crate::installer::Installer;
use crate::module_name::ModuleName;
use crate::repository::{GitOperations, Workspace};

/// One recorded external call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    RevParse(PathBuf),
    IndexEntry(PathBuf, String),
    UpdateIndex(PathBuf, IndexEntry),
    HasCommit(PathBuf, Revision),
    Fetch(PathBuf),
    CheckoutDetached(PathBuf, Revision),
    CheckoutBranch(PathBuf, String),
    SubmoduleUpdateInit(ModuleName),
    SubmoduleSync(ModuleName),
    SubmoduleUpdateRemote(ModuleName),
    SubmoduleDeinit(ModuleName),
    CleanUntracked(PathBuf),
    RmForce(ModuleName),
    ResetPaths(Vec<String>),
    CheckoutPaths(Vec<String>),
    RemoveMetadata(ModuleName),
    Install(PathBuf),
}

impl Call {
    /// Whether this call changes repository state.
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            Call::RevParse(_) | Call::IndexEntry(..) | Call::HasCommit(..)
        )
    }
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    heads: HashMap<PathBuf, Revision>,
    checkouts: HashSet<PathBuf>,
    index: HashMap<(PathBuf, String), IndexEntry>,
    commits: HashSet<(PathBuf, Revision)>,
    failing: HashSet<(&'static str, PathBuf)>,
}

/// In-memory `GitOperations` that records every call.
#[derive(Clone, Default)]
pub struct RecordingGit {
    state: Arc<Mutex<State>>,
}

impl RecordingGit {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("recording state poisoned")
    }

    /// `dir` is a checkout with `HEAD` at `revision`.
    pub fn set_head(&self, dir: &Path, revision: Revision) {
        let mut state = self.state();
        state.checkouts.insert(dir.to_path_buf());
        state.commits.insert((dir.to_path_buf(), revision.clone()));
        state.heads.insert(dir.to_path_buf(), revision);
    }

    pub fn set_index_entry(&self, repo: &Path, entry: IndexEntry) {
        self.state()
            .index
            .insert((repo.to_path_buf(), entry.path.clone()), entry);
    }

    pub fn add_commit(&self, dir: &Path, revision: Revision) {
        self.state().commits.insert((dir.to_path_buf(), revision));
    }

    /// Make operation `op` fail when run in `dir`.
    pub fn fail_on(&self, op: &'static str, dir: &Path) {
        self.state().failing.insert((op, dir.to_path_buf()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn index(&self, repo: &Path, path: &str) -> Option<IndexEntry> {
        self.state()
            .index
            .get(&(repo.to_path_buf(), path.to_string()))
            .cloned()
    }

    pub fn head(&self, dir: &Path) -> Option<Revision> {
        self.state().heads.get(dir).cloned()
    }

    /// An installer that records into this log.
    pub fn installer(&self) -> RecordingInstaller {
        RecordingInstaller { git: self.clone() }
    }

    fn call(&self, op: &'static str, dir: &Path, call: Call) -> Result<()> {
        let mut state = self.state();
        state.calls.push(call);
        if state.failing.contains(&(op, dir.to_path_buf())) {
            return Err(Error::GitCommand {
                command: op.to_string(),
                cwd: dir.to_path_buf(),
                stderr: "simulated failure".to_string(),
            });
        }
        Ok(())
    }
}

impl GitOperations for RecordingGit {
    fn rev_parse_head(&self, dir: &Path) -> Result<Revision> {
        self.call("rev_parse_head", dir, Call::RevParse(dir.to_path_buf()))?;
        self.head(dir).ok_or_else(|| Error::NotACheckout {
            path: dir.to_path_buf(),
        })
    }

    fn is_checkout(&self, dir: &Path) -> bool {
        self.state().checkouts.contains(dir)
    }

    fn index_entry(&self, repo: &Path, path: &str) -> Result<Option<IndexEntry>> {
        self.call(
            "index_entry",
            repo,
            Call::IndexEntry(repo.to_path_buf(), path.to_string()),
        )?;
        Ok(self.index(repo, path))
    }

    fn update_index(&self, repo: &Path, entry: &IndexEntry) -> Result<()> {
        self.call(
            "update_index",
            repo,
            Call::UpdateIndex(repo.to_path_buf(), entry.clone()),
        )?;
        self.state()
            .index
            .insert((repo.to_path_buf(), entry.path.clone()), entry.clone());
        Ok(())
    }

    fn has_commit(&self, dir: &Path, revision: &Revision) -> Result<bool> {
        self.call(
            "has_commit",
            dir,
            Call::HasCommit(dir.to_path_buf(), revision.clone()),
        )?;
        Ok(self
            .state()
            .commits
            .contains(&(dir.to_path_buf(), revision.clone())))
    }

    fn fetch(&self, dir: &Path) -> Result<()> {
        self.call("fetch", dir, Call::Fetch(dir.to_path_buf()))
    }

    fn checkout_detached(&self, dir: &Path, revision: &Revision) -> Result<()> {
        self.call(
            "checkout_detached",
            dir,
            Call::CheckoutDetached(dir.to_path_buf(), revision.clone()),
        )?;
        self.state()
            .heads
            .insert(dir.to_path_buf(), revision.clone());
        Ok(())
    }

    fn checkout_branch(&self, dir: &Path, branch: &str) -> Result<()> {
        self.call(
            "checkout_branch",
            dir,
            Call::CheckoutBranch(dir.to_path_buf(), branch.to_string()),
        )
    }

    fn submodule_update_init(&self, root: &Path, module: &ModuleName) -> Result<()> {
        self.call(
            "submodule_update_init",
            &module.path_in(root),
            Call::SubmoduleUpdateInit(module.clone()),
        )
    }

    fn submodule_sync(&self, root: &Path, module: &ModuleName) -> Result<()> {
        self.call(
            "submodule_sync",
            &module.path_in(root),
            Call::SubmoduleSync(module.clone()),
        )
    }

    fn submodule_update_remote(&self, root: &Path, module: &ModuleName) -> Result<()> {
        self.call(
            "submodule_update_remote",
            &module.path_in(root),
            Call::SubmoduleUpdateRemote(module.clone()),
        )
    }

    fn submodule_deinit(&self, root: &Path, module: &ModuleName) -> Result<()> {
        self.call(
            "submodule_deinit",
            &module.path_in(root),
            Call::SubmoduleDeinit(module.clone()),
        )
    }

    fn clean_untracked(&self, dir: &Path) -> Result<()> {
        self.call(
            "clean_untracked",
            dir,
            Call::CleanUntracked(dir.to_path_buf()),
        )
    }

    fn rm_force(&self, root: &Path, module: &ModuleName) -> Result<()> {
        self.call(
            "rm_force",
            &module.path_in(root),
            Call::RmForce(module.clone()),
        )
    }

    fn reset_paths(&self, root: &Path, paths: &[&str]) -> Result<()> {
        self.call(
            "reset_paths",
            root,
            Call::ResetPaths(paths.iter().map(|p| p.to_string()).collect()),
        )
    }

    fn checkout_paths(&self, root: &Path, paths: &[&str]) -> Result<()> {
        self.call(
            "checkout_paths",
            root,
            Call::CheckoutPaths(paths.iter().map(|p| p.to_string()).collect()),
        )
    }

    fn remove_module_metadata(&self, root: &Path, module: &ModuleName) -> Result<()> {
        self.call(
            "remove_module_metadata",
            &module.path_in(root),
            Call::RemoveMetadata(module.clone()),
        )
    }
}

/// `Installer` that records into a `RecordingGit` log.
pub struct RecordingInstaller {
    git: RecordingGit,
}

impl Installer for RecordingInstaller {
    fn install(&self, dir: &Path) -> Result<()> {
        self.git
            .call("install", dir, Call::Install(dir.to_path_buf()))
    }
}

/// A deterministic full-length revision.
pub fn sha(n: u32) -> Revision {
    format!("{:040x}", n)
        .parse()
        .expect("generated revision is valid")
}

/// Manifest text declaring `modules`.
pub fn manifest_text(modules: &[&str]) -> String {
    modules
        .iter()
        .map(|m| format!("[submodule \"{m}\"]\n\tpath = {m}\n\turl = ../{m}.git\n"))
        .collect()
}

/// A temporary repository root with a manifest and a recording git.
pub struct Fixture {
    temp_dir: TempDir,
    pub git: RecordingGit,
}

impl Fixture {
    pub fn new(modules: &[&str]) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join(".gitmodules"), manifest_text(modules))
            .expect("Failed to write manifest");
        Self {
            temp_dir,
            git: RecordingGit::default(),
        }
    }

    /// Give `module` its own manifest declaring `nested`.
    pub fn with_nested(self, module: &str, nested: &[&str]) -> Self {
        let dir = self.dir(module);
        fs::create_dir_all(&dir).expect("Failed to create module directory");
        fs::write(dir.join(".gitmodules"), manifest_text(nested))
            .expect("Failed to write nested manifest");
        self
    }

    /// `module` is checked out at `revision`.
    pub fn with_head(self, module: &str, revision: Revision) -> Self {
        self.git.set_head(&self.dir(module), revision);
        self
    }

    /// Repository `repo` has a `160000` index entry for `path` at `revision`.
    pub fn with_gitlink(self, repo: &str, path: &str, revision: Revision) -> Self {
        self.git.set_index_entry(
            &self.dir(repo),
            IndexEntry {
                mode: FileMode::gitlink(),
                revision,
                path: path.to_string(),
            },
        );
        self
    }

    /// Operation `op` fails when run for `module`.
    pub fn failing(self, op: &'static str, module: &str) -> Self {
        self.git.fail_on(op, &self.dir(module));
        self
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        fs::write(self.root().join(path), content).expect("Failed to write file");
        self
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory of `module` (a path relative to the root).
    pub fn dir(&self, module: &str) -> PathBuf {
        self.root().join(module)
    }

    pub fn workspace(&self) -> Workspace {
        Workspace::with_operations(
            self.root().to_path_buf(),
            Config::default(),
            Box::new(self.git.clone()),
            Box::new(self.git.installer()),
        )
    }
}
