//! # Per-Module Operations
//!
//! `list`, `clean`, `checkout`, `pull` and `remove` all walk the root
//! manifest in declaration order, one module at a time, and apply a fixed
//! sequence of steps to every module the [`Scope`] includes. A module name
//! that the manifest does not declare simply matches nothing.
//!
//! Steps are best effort (see [`crate::runner`]): a failure is logged and the
//! remaining steps and modules still run. The returned [`Report`] says what
//! was attempted and how many steps failed; it never carries an error.
//!
//! | Operation  | Steps per module                                                   |
//! |------------|--------------------------------------------------------------------|
//! | `clean`    | clean untracked, deinit, drop metadata, rm (then reset), restore    |
//! | `checkout` | init + update, switch to override branch (if any), install          |
//! | `pull`     | sync url, update to remote head, install                            |
//! | `remove`   | deinit, drop metadata, rm (then reset)                              |

use crate::branches;
use crate::module_name::{ModuleName, Scope};
use crate::repository::Workspace;
use crate::runner::Steps;

/// Outcome of a per-module operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Modules the operation was applied to, in manifest order.
    pub processed: Vec<ModuleName>,
    /// Number of failed steps across all modules.
    pub failures: usize,
}

/// Modules declared by the root manifest, in declaration order.
pub fn list(workspace: &Workspace) -> Vec<ModuleName> {
    workspace.modules()
}

fn for_each_in_scope<F>(workspace: &Workspace, scope: &Scope, mut apply: F) -> Report
where
    F: FnMut(&ModuleName, &mut Steps<'_>),
{
    let mut report = Report::default();
    for module in workspace.modules() {
        if !scope.includes(&module) {
            continue;
        }
        let mut steps = Steps::new(&module);
        apply(&module, &mut steps);
        report.failures += steps.failures();
        report.processed.push(module);
    }
    report
}

/// Revert modules to the never-initialized state while keeping them declared.
pub fn clean(workspace: &Workspace, scope: &Scope) -> Report {
    let root = workspace.root();
    let git = workspace.git();
    let manifest = workspace.config().manifest.as_str();

    for_each_in_scope(workspace, scope, |module, steps| {
        let paths = [manifest, module.as_str()];
        steps.run("clean", || git.clean_untracked(&workspace.module_dir(module)));
        steps.run("deinit", || git.submodule_deinit(root, module));
        steps.run("remove metadata", || git.remove_module_metadata(root, module));
        if steps.run("rm", || git.rm_force(root, module)) {
            steps.run("reset", || git.reset_paths(root, &paths));
        }
        steps.run("restore", || git.checkout_paths(root, &paths));
    })
}

/// Check modules out at their pinned revision and install their dependencies.
pub fn checkout(workspace: &Workspace, scope: &Scope) -> Report {
    let root = workspace.root();
    let git = workspace.git();
    let overrides = branches::read_branches(&workspace.config().branches_path(root));

    for_each_in_scope(workspace, scope, |module, steps| {
        let dir = workspace.module_dir(module);
        steps.run("update", || git.submodule_update_init(root, module));
        if let Some(branch) = overrides.get(module) {
            steps.run("switch branch", || git.checkout_branch(&dir, branch));
        }
        steps.run("install", || workspace.installer().install(&dir));
    })
}

/// Fast-forward modules to their remote head and install their dependencies.
pub fn pull(workspace: &Workspace, scope: &Scope) -> Report {
    let root = workspace.root();
    let git = workspace.git();

    for_each_in_scope(workspace, scope, |module, steps| {
        steps.run("sync", || git.submodule_sync(root, module));
        steps.run("update", || git.submodule_update_remote(root, module));
        steps.run("install", || {
            workspace.installer().install(&workspace.module_dir(module))
        });
    })
}

/// Deinitialize and undeclare modules.
pub fn remove(workspace: &Workspace, scope: &Scope) -> Report {
    let root = workspace.root();
    let git = workspace.git();
    let manifest = workspace.config().manifest.as_str();

    for_each_in_scope(workspace, scope, |module, steps| {
        steps.run("deinit", || git.submodule_deinit(root, module));
        steps.run("remove metadata", || git.remove_module_metadata(root, module));
        if steps.run("rm", || git.rm_force(root, module)) {
            steps.run("reset", || git.reset_paths(root, &[manifest, module.as_str()]));
        }
    })
}
