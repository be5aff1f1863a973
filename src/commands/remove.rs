//! # Remove Command Implementation
//!
//! Deinitializes submodules, deletes their git metadata and unregisters them
//! from the index and the manifest. Unlike `clean`, nothing is restored
//! afterwards; commit the result to drop the submodules for good.

use anyhow::Result;

use modsync::operations;
use modsync::output::OutputConfig;
use modsync::repository::Workspace;

use super::ModuleArgs;

/// Execute the `remove` command.
pub fn execute(args: ModuleArgs, workspace: &Workspace, output: &OutputConfig) -> Result<()> {
    let report = operations::remove(workspace, &args.scope());
    if !report.processed.is_empty() {
        println!(
            "{}",
            output.summary(
                &format!("Removed {} module(s)", report.processed.len()),
                report.failures
            )
        );
    }
    Ok(())
}
