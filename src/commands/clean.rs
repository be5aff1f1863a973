//! # Clean Command Implementation
//!
//! Reverts submodules to the state of a fresh clone of the superproject:
//! checkout contents, untracked files and git metadata are discarded, while
//! the manifest entry and the pinned revision are restored from `HEAD`.

use anyhow::Result;

use modsync::operations;
use modsync::output::OutputConfig;
use modsync::repository::Workspace;

use super::ModuleArgs;

/// Execute the `clean` command.
pub fn execute(args: ModuleArgs, workspace: &Workspace, output: &OutputConfig) -> Result<()> {
    let report = operations::clean(workspace, &args.scope());
    if !report.processed.is_empty() {
        println!(
            "{}",
            output.summary(
                &format!("Cleaned {} module(s)", report.processed.len()),
                report.failures
            )
        );
    }
    Ok(())
}
