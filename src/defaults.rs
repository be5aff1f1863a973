//! Default values for modsync configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

/// Manifest file that declares a repository's submodules.
pub const DEFAULT_MANIFEST_FILENAME: &str = ".gitmodules";

/// Optional file mapping submodules to the branch `checkout` should switch to.
pub const DEFAULT_BRANCHES_FILENAME: &str = ".gitbranches";

/// Optional modsync configuration file at the repository root.
pub const DEFAULT_CONFIG_FILENAME: &str = ".modsync.yaml";

/// Directory (relative to the repository root) holding submodule git metadata.
pub const MODULES_METADATA_DIR: &str = ".git/modules";

/// Program run after `checkout` and `pull` to install a module's dependencies.
pub const DEFAULT_INSTALL_COMMAND: &str = "pnpm";

/// Arguments for [`DEFAULT_INSTALL_COMMAND`]: production-only install.
pub fn default_install_args() -> Vec<String> {
    vec!["i".to_string(), "-P".to_string()]
}
