//! # Revision Propagation
//!
//! `sync` keeps a shared submodule consistent across the other top-level
//! modules that embed it. Given a *dependency* module checked out at the root,
//! every other module whose own manifest declares that dependency gets its
//! gitlink for it pointed at the dependency's current revision.
//!
//! ## Discovery
//!
//! There is no stored dependency graph. [`dependents`] re-reads each
//! candidate's manifest from disk on every call, so edges always reflect the
//! manifests as they are now. Discovery looks exactly one level below each
//! top-level module.
//!
//! ## Update
//!
//! The pin is rewritten directly in the dependent's index with
//! `git update-index --cacheinfo`, keeping the mode the entry already had.
//! This moves the pointer without checking out or committing anything in the
//! dependent. If the nested checkout is initialized on disk, it is also moved
//! to the new revision (fetching first when the commit is not there yet).
//! Uninitialized nested checkouts are left as they are.
//!
//! Resolving the dependency's revision is the only fatal step. After that,
//! each dependent is handled independently and failures are logged and
//! counted.

use std::path::Path;

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::git::{FileMode, IndexEntry, Revision};
use crate::manifest;
use crate::module_name::{ModuleName, Scope};
use crate::repository::Workspace;
use crate::runner::Steps;

/// Outcome of a `sync` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// The revision that was propagated.
    pub revision: Revision,
    /// Dependents whose index entry now points at `revision`.
    pub updated: Vec<ModuleName>,
    /// Candidates that do not declare the dependency.
    pub skipped: Vec<ModuleName>,
    /// Failed steps across all dependents.
    pub failures: usize,
}

/// The candidates whose own manifest declares `dependency`.
///
/// Each candidate's manifest (`<root>/<candidate>/<manifest_name>`) is read
/// fresh. Candidates keep their input order.
pub fn dependents<'a>(
    root: &Path,
    manifest_name: &str,
    dependency: &ModuleName,
    candidates: impl IntoIterator<Item = &'a ModuleName>,
) -> Vec<ModuleName> {
    candidates
        .into_iter()
        .filter(|candidate| {
            let nested = manifest::read_modules(&candidate.path_in(root).join(manifest_name));
            manifest::declares(&nested, dependency)
        })
        .cloned()
        .collect()
}

/// Propagate `dependency`'s current revision to the modules that embed it.
///
/// With `target` set to [`Scope::Only`], only that module is considered.
/// Returns [`Error::RevisionUnresolved`] without touching anything if the
/// dependency's checkout has no resolvable `HEAD`.
pub fn sync(
    workspace: &Workspace,
    dependency: &ModuleName,
    target: &Scope,
) -> Result<SyncReport> {
    let revision = workspace
        .git()
        .rev_parse_head(&workspace.module_dir(dependency))
        .map_err(|e| Error::RevisionUnresolved {
            module: dependency.to_string(),
            message: e.to_string(),
        })?;
    debug!("{} is at {}", dependency, revision);

    let candidates: Vec<ModuleName> = workspace
        .modules()
        .into_iter()
        .filter(|module| module != dependency && target.includes(module))
        .collect();
    let found = dependents(
        workspace.root(),
        &workspace.config().manifest,
        dependency,
        &candidates,
    );

    let mut report = SyncReport {
        revision,
        updated: Vec::new(),
        skipped: candidates
            .into_iter()
            .filter(|candidate| !found.contains(candidate))
            .collect(),
        failures: 0,
    };

    for dependent in found {
        let mut steps = Steps::new(&dependent);
        let updated = update_dependent(
            workspace,
            &dependent,
            dependency,
            &report.revision,
            &mut steps,
        );
        report.failures += steps.failures();
        if updated {
            report.updated.push(dependent);
        }
    }
    Ok(report)
}

/// Point `dependent`'s pin for `dependency` at `revision`. Returns whether the
/// index entry was written.
fn update_dependent(
    workspace: &Workspace,
    dependent: &ModuleName,
    dependency: &ModuleName,
    revision: &Revision,
    steps: &mut Steps<'_>,
) -> bool {
    let git = workspace.git();
    let repo = workspace.module_dir(dependent);
    info!("Ensuring that `{}` is up to date...", dependent);

    let current = steps.record("read index", git.index_entry(&repo, dependency.as_str()));
    let Some(current) = current else {
        return false;
    };
    let mode = match current {
        Some(entry) => entry.mode,
        None => {
            warn!(
                "{}: no index entry for {}, registering it as a submodule",
                dependent, dependency
            );
            FileMode::gitlink()
        }
    };
    let entry = IndexEntry {
        mode,
        revision: revision.clone(),
        path: dependency.to_string(),
    };
    if !steps.run("update index", || git.update_index(&repo, &entry)) {
        return false;
    }

    let nested = dependency.path_in(&repo);
    if git.is_checkout(&nested) {
        move_checkout(workspace, &nested, revision, steps);
    } else {
        debug!("{} is not checked out, leaving it alone", nested.display());
    }
    true
}

/// Move an initialized nested checkout to `revision`.
fn move_checkout(
    workspace: &Workspace,
    dir: &Path,
    revision: &Revision,
    steps: &mut Steps<'_>,
) {
    let git = workspace.git();
    if let Ok(head) = git.rev_parse_head(dir) {
        if &head == revision {
            return;
        }
    }
    let present = steps.record("look up revision", git.has_commit(dir, revision));
    if present == Some(false) {
        steps.run("fetch", || git.fetch(dir));
    }
    steps.run("check out revision", || git.checkout_detached(dir, revision));
}
