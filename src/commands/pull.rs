//! # Pull Command Implementation
//!
//! Synchronizes each submodule's remote URL from the manifest and moves it to
//! the latest revision of its remote tracking branch, then runs the
//! dependency installer. The new revisions are left unstaged in the
//! superproject for review.

use anyhow::Result;

use modsync::operations;
use modsync::output::OutputConfig;
use modsync::repository::Workspace;

use super::ModuleArgs;

/// Execute the `pull` command.
pub fn execute(args: ModuleArgs, workspace: &Workspace, output: &OutputConfig) -> Result<()> {
    let report = operations::pull(workspace, &args.scope());
    if !report.processed.is_empty() {
        println!(
            "{}",
            output.summary(
                &format!("Pulled {} module(s)", report.processed.len()),
                report.failures
            )
        );
    }
    Ok(())
}
