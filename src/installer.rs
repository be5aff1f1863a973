//! Dependency installation run after a module is checked out or pulled.
//!
//! The installer is an external collaborator: modsync only starts it in the
//! module's directory, relays what it prints and reports whether it exited
//! successfully. Failures are never retried.

use std::path::Path;
use std::process::Command;

use log::debug;

use crate::config::InstallConfig;
use crate::error::{Error, Result};

/// Installs a module's own dependencies.
pub trait Installer: Send + Sync {
    fn install(&self, dir: &Path) -> Result<()>;
}

/// Runs a configured program, `pnpm i -P` by default.
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    program: String,
    args: Vec<String>,
}

impl CommandInstaller {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Installer for CommandInstaller {
    fn install(&self, dir: &Path) -> Result<()> {
        debug!("{} (in {})", self.command_line(), dir.display());
        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(dir)
            .output()
            .map_err(|e| Error::Install {
                command: self.command_line(),
                cwd: dir.to_path_buf(),
                message: e.to_string(),
            })?;
        crate::git::relay(&output);
        if !output.status.success() {
            return Err(Error::Install {
                command: self.command_line(),
                cwd: dir.to_path_buf(),
                message: output.status.to_string(),
            });
        }
        Ok(())
    }
}

/// Used when installation is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInstaller;

impl Installer for NoopInstaller {
    fn install(&self, dir: &Path) -> Result<()> {
        debug!("Skipping dependency installation in {}", dir.display());
        Ok(())
    }
}

/// Build the installer described by `config`.
pub fn from_config(config: &InstallConfig) -> Box<dyn Installer> {
    if config.enabled {
        Box::new(CommandInstaller::new(&config.command, config.args.clone()))
    } else {
        Box::new(NoopInstaller)
    }
}
