//! # Checkout Command Implementation
//!
//! Initializes and updates submodules to the revision pinned in the
//! superproject. Modules listed in the branch override file (`.gitbranches`
//! by default) are then switched to their branch. Finally the dependency
//! installer runs inside each module unless `--no-install` is given.

use anyhow::Result;

use modsync::operations;
use modsync::output::OutputConfig;
use modsync::repository::Workspace;

use super::ModuleArgs;

/// Execute the `checkout` command.
pub fn execute(args: ModuleArgs, workspace: &Workspace, output: &OutputConfig) -> Result<()> {
    let report = operations::checkout(workspace, &args.scope());
    if !report.processed.is_empty() {
        println!(
            "{}",
            output.summary(
                &format!("Checked out {} module(s)", report.processed.len()),
                report.failures
            )
        );
    }
    Ok(())
}
