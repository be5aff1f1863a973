//! # List Command Implementation
//!
//! Prints every submodule declared in the root manifest, one per line, in
//! declaration order. This is a read-only operation.

use anyhow::Result;

use modsync::operations;
use modsync::repository::Workspace;

/// Execute the `list` command.
pub fn execute(workspace: &Workspace) -> Result<()> {
    for module in operations::list(workspace) {
        println!("{}", module);
    }
    Ok(())
}
