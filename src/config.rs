//! # Configuration
//!
//! modsync works without any configuration. A `.modsync.yaml` file at the
//! repository root can override the file names it reads and the command it
//! runs to install a module's dependencies:
//!
//! ```yaml
//! manifest: .gitmodules
//! branches: .gitbranches
//! install:
//!   enabled: true
//!   command: pnpm
//!   args: ["i", "-P"]
//! ```
//!
//! Every key is optional. Unknown keys are rejected so that typos surface
//! instead of being silently ignored.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::defaults;
use crate::error::{Error, Result};

/// Top-level modsync configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Manifest file name, used both at the root and inside each module.
    pub manifest: String,
    /// Branch override file name at the root.
    pub branches: String,
    pub install: InstallConfig,
}

/// The dependency installation step run after `checkout` and `pull`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallConfig {
    pub enabled: bool,
    pub command: String,
    pub args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest: defaults::DEFAULT_MANIFEST_FILENAME.to_string(),
            branches: defaults::DEFAULT_BRANCHES_FILENAME.to_string(),
            install: InstallConfig::default(),
        }
    }
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: defaults::DEFAULT_INSTALL_COMMAND.to_string(),
            args: defaults::default_install_args(),
        }
    }
}

impl Config {
    /// Path of the manifest inside `dir` (the root or a module checkout).
    pub fn manifest_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.manifest)
    }

    pub fn branches_path(&self, root: &Path) -> PathBuf {
        root.join(&self.branches)
    }
}

/// Parse configuration from YAML text. An empty document yields the defaults.
pub fn parse(yaml_content: &str) -> Result<Config> {
    if yaml_content.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some(format!(
            "Valid keys are `manifest`, `branches` and `install` (enabled, command, args); see {}",
            defaults::DEFAULT_CONFIG_FILENAME
        )),
    })?;
    if config.install.enabled && config.install.command.trim().is_empty() {
        return Err(Error::ConfigParse {
            message: "install.command must not be empty".to_string(),
            hint: Some("Set `install.enabled: false` to skip dependency installation".to_string()),
        });
    }
    Ok(config)
}

/// Load configuration from a file that must exist.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Load configuration for a repository.
///
/// An explicitly requested file must exist. Otherwise `.modsync.yaml` under
/// `root` is used when present and the defaults when it is not.
pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return from_file(path);
    }
    match std::fs::read_to_string(root.join(defaults::DEFAULT_CONFIG_FILENAME)) {
        Ok(content) => parse(&content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(Error::Io(e)),
    }
}
