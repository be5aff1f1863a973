//! # Sync Command Implementation
//!
//! Propagates the revision a dependency submodule is currently checked out at
//! to every other submodule that embeds the same dependency in its own
//! manifest. Each dependent gets its index entry rewritten to the new revision
//! (staged, not committed), and its nested checkout of the dependency is moved
//! there when it is initialized.
//!
//! ## Example
//!
//! ```bash
//! # After committing to libs/core, point every module that embeds it at the new commit
//! modsync sync libs/core
//!
//! # Only update the pin inside apps/web
//! modsync sync libs/core apps/web
//! ```

use anyhow::Result;
use clap::Args;
use log::error;

use modsync::module_name::{clean_module_name, Scope};
use modsync::output::OutputConfig;
use modsync::propagate;
use modsync::repository::Workspace;

/// Propagate a dependency's revision to its dependents
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// The submodule whose current revision is propagated
    #[arg(value_name = "DEPENDENCY")]
    pub dependency: Option<String>,

    /// Only update this dependent (a trailing slash is ignored)
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,
}

/// Execute the `sync` command.
///
/// A missing dependency argument or an unresolvable dependency revision is
/// reported on stderr; neither changes anything and neither fails the process.
pub fn execute(args: SyncArgs, workspace: &Workspace, output: &OutputConfig) -> Result<()> {
    let Some(dependency) = clean_module_name(args.dependency.as_deref()) else {
        error!("You must specify a module to sync");
        return Ok(());
    };
    let target = Scope::from_arg(args.target.as_deref());

    let report = match propagate::sync(workspace, &dependency, &target) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            return Ok(());
        }
    };

    for module in &report.updated {
        println!("  {}", output.module(module));
    }
    println!(
        "{}",
        output.summary(
            &format!(
                "Propagated {}@{} to {} module(s)",
                output.module(&dependency),
                report.revision.short(),
                report.updated.len()
            ),
            report.failures
        )
    );
    Ok(())
}
