//! Branch override file reader.
//!
//! The override file is optional and line oriented: each line names a module
//! and the branch `checkout` should switch it to, separated by whitespace.
//!
//! ```text
//! libs/core   develop
//! libs/ui     feature/new-theme
//! ```

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, warn};

use crate::module_name::ModuleName;

/// Module name to preferred branch.
pub type BranchMap = BTreeMap<ModuleName, String>;

/// Parse override lines. Blank lines, `#` comments and lines without a
/// branch name are skipped.
pub fn parse_branches(content: &str) -> BranchMap {
    let mut branches = BranchMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((module, branch)) = line.split_once(char::is_whitespace) else {
            debug!("Ignoring branch override without a branch name: {:?}", line);
            continue;
        };
        let branch = branch.trim();
        if branch.is_empty() {
            continue;
        }
        branches.insert(ModuleName::new(module), branch.to_string());
    }
    branches
}

/// Read the override file at `path`. A missing file means no overrides.
pub fn read_branches(path: &Path) -> BranchMap {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_branches(&content),
        Err(e) if e.kind() == ErrorKind::NotFound => BranchMap::new(),
        Err(e) => {
            warn!("Could not read {}: {}", path.display(), e);
            BranchMap::new()
        }
    }
}
