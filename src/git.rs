//! Thin wrappers around the system `git` command.
//!
//! Every function takes the directory it operates in explicitly; nothing here
//! depends on the process working directory. Commands that change repository
//! state relay git's own stdout and stderr verbatim so the user sees exactly
//! what git reported. Query commands capture their output instead.
//!
//! Using the system git means submodule remotes authenticate the way the user
//! has configured them (SSH agent, credential helpers, tokens).

use std::fmt;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::str::FromStr;

use log::debug;

use crate::defaults::MODULES_METADATA_DIR;
use crate::error::{Error, Result};
use crate::module_name::ModuleName;

/// A full commit object id (SHA-1 or SHA-256, lowercase hex).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Revision(String);

impl Revision {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for messages.
    pub fn short(&self) -> &str {
        &self.0[..7]
    }
}

impl FromStr for Revision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        let valid_len = value.len() == 40 || value.len() == 64;
        if valid_len && value.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(value.to_ascii_lowercase()))
        } else {
            Err(Error::InvalidRevision {
                value: s.to_string(),
            })
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The octal mode git records for an index entry, e.g. `160000`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMode(String);

impl FileMode {
    /// Mode of a submodule (gitlink) entry.
    pub const GITLINK: &'static str = "160000";

    pub fn new(mode: impl Into<String>) -> Self {
        Self(mode.into())
    }

    pub fn gitlink() -> Self {
        Self::new(Self::GITLINK)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One stage-0 entry of a repository index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub mode: FileMode,
    pub revision: Revision,
    pub path: String,
}

impl IndexEntry {
    /// The `--cacheinfo` argument for `git update-index`.
    pub fn cacheinfo(&self) -> String {
        format!("{},{},{}", self.mode, self.revision, self.path)
    }
}

/// Parse one line of `git ls-files --stage`: `<mode> <object> <stage>\t<path>`.
pub fn parse_ls_files_line(line: &str) -> Option<IndexEntry> {
    let (meta, path) = line.split_once('\t')?;
    let mut fields = meta.split_whitespace();
    let mode = fields.next()?;
    let revision = fields.next()?.parse().ok()?;
    let _stage = fields.next()?;
    Some(IndexEntry {
        mode: FileMode::new(mode),
        revision,
        path: path.to_string(),
    })
}

fn command_line(args: &[&str]) -> String {
    format!("git {}", args.join(" "))
}

fn spawn(cwd: &Path, args: &[&str]) -> Result<Output> {
    debug!("{} (in {})", command_line(args), cwd.display());
    Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|e| Error::GitSpawn {
            cwd: cwd.to_path_buf(),
            message: e.to_string(),
        })
}

fn failure(cwd: &Path, args: &[&str], output: &Output) -> Error {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    Error::GitCommand {
        command: command_line(args),
        cwd: cwd.to_path_buf(),
        stderr: if stderr.is_empty() {
            output.status.to_string()
        } else {
            stderr
        },
    }
}

/// Run git and return its stdout without relaying anything.
pub fn capture(cwd: &Path, args: &[&str]) -> Result<String> {
    let output = spawn(cwd, args)?;
    if !output.status.success() {
        return Err(failure(cwd, args, &output));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run git, relaying its stdout and stderr verbatim.
pub fn run(cwd: &Path, args: &[&str]) -> Result<()> {
    let output = spawn(cwd, args)?;
    relay(&output);
    if !output.status.success() {
        return Err(failure(cwd, args, &output));
    }
    Ok(())
}

/// Copy captured child output to our own stdout/stderr.
pub(crate) fn relay(output: &Output) {
    // Relaying is best effort; a closed pipe must not turn into a failed step.
    if !output.stdout.is_empty() {
        let _ = std::io::stdout().write_all(&output.stdout);
    }
    if !output.stderr.is_empty() {
        let _ = std::io::stderr().write_all(&output.stderr);
    }
}

/// Resolve `HEAD` of the checkout at `dir`.
///
/// `dir` must be a checkout itself; otherwise git would walk up and answer
/// for the enclosing repository.
pub fn rev_parse_head(dir: &Path) -> Result<Revision> {
    if !is_checkout(dir) {
        return Err(Error::NotACheckout {
            path: dir.to_path_buf(),
        });
    }
    capture(dir, &["rev-parse", "--verify", "HEAD"])?.parse()
}

/// Read the stage-0 index entry for `path` in the repository at `repo`.
pub fn ls_files_stage(repo: &Path, path: &str) -> Result<Option<IndexEntry>> {
    let stdout = capture(repo, &["ls-files", "-z", "--stage", "--", path])?;
    Ok(find_stage_entry(&stdout, path))
}

/// Find `path` among NUL-terminated `ls-files -z --stage` records. With `-z`
/// git prints paths verbatim instead of C-quoting them.
pub fn find_stage_entry(records: &str, path: &str) -> Option<IndexEntry> {
    records
        .split('\0')
        .filter_map(parse_ls_files_line)
        .find(|entry| entry.path == path)
}

/// Point the index entry for `entry.path` at `entry.revision`.
pub fn update_index_cacheinfo(repo: &Path, entry: &IndexEntry) -> Result<()> {
    let cacheinfo = entry.cacheinfo();
    run(repo, &["update-index", "--add", "--cacheinfo", &cacheinfo])
}

/// Whether the object database at `dir` already has commit `revision`.
///
/// A checkout whose `.git` points at a missing git directory is an error,
/// not a missing commit.
pub fn has_commit(dir: &Path, revision: &Revision) -> Result<bool> {
    let object = format!("{}^{{commit}}", revision);
    let args = ["cat-file", "-e", object.as_str()];
    let output = spawn(dir, &args)?;
    if output.status.success() {
        return Ok(true);
    }
    if is_not_a_repository(&output.stderr) {
        return Err(failure(dir, &args, &output));
    }
    Ok(false)
}

fn is_not_a_repository(stderr: &[u8]) -> bool {
    String::from_utf8_lossy(stderr)
        .to_ascii_lowercase()
        .contains("not a git repository")
}

pub fn fetch(dir: &Path) -> Result<()> {
    run(dir, &["fetch", "--quiet"])
}

pub fn checkout_detached(dir: &Path, revision: &Revision) -> Result<()> {
    run(dir, &["checkout", "--quiet", "--detach", revision.as_str()])
}

pub fn checkout_branch(dir: &Path, branch: &str) -> Result<()> {
    run(dir, &["checkout", branch])
}

pub fn submodule_update_init(root: &Path, module: &ModuleName) -> Result<()> {
    run(root, &["submodule", "update", "--init", "--", module.as_str()])
}

pub fn submodule_sync(root: &Path, module: &ModuleName) -> Result<()> {
    run(root, &["submodule", "sync", "--", module.as_str()])
}

pub fn submodule_update_remote(root: &Path, module: &ModuleName) -> Result<()> {
    run(root, &["submodule", "update", "--remote", "--", module.as_str()])
}

pub fn submodule_deinit(root: &Path, module: &ModuleName) -> Result<()> {
    run(root, &["submodule", "deinit", "-f", "--", module.as_str()])
}

/// Remove every untracked and ignored file, including nested repositories.
pub fn clean_untracked(dir: &Path) -> Result<()> {
    run(dir, &["clean", "-xffd"])
}

/// `git rm -f`, which also drops the module's manifest section.
pub fn rm_force(root: &Path, module: &ModuleName) -> Result<()> {
    run(root, &["rm", "-f", "--", module.as_str()])
}

/// Unstage `paths` back to `HEAD`.
pub fn reset_paths(root: &Path, paths: &[&str]) -> Result<()> {
    let mut args = vec!["reset", "--quiet", "--"];
    args.extend_from_slice(paths);
    run(root, &args)
}

/// Restore `paths` in the working tree from the index.
pub fn checkout_paths(root: &Path, paths: &[&str]) -> Result<()> {
    let mut args = vec!["checkout", "--"];
    args.extend_from_slice(paths);
    run(root, &args)
}

/// Directory holding the submodule's git metadata inside the root repository.
pub fn module_metadata_dir(root: &Path, module: &ModuleName) -> PathBuf {
    root.join(MODULES_METADATA_DIR).join(module.as_str())
}

/// Delete the submodule's git metadata. Already gone counts as success.
pub fn remove_module_metadata(root: &Path, module: &ModuleName) -> Result<()> {
    let dir = module_metadata_dir(root, module);
    match std::fs::remove_dir_all(&dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Io(e)),
    }
}

/// Whether `dir` is an initialized checkout (has a `.git` file or directory).
pub fn is_checkout(dir: &Path) -> bool {
    dir.join(".git").exists()
}
