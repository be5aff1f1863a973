//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `modsync`
//! command-line tool. Each subcommand is defined in its own file to keep the
//! logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module contains an `execute` function that takes the parsed
//! arguments and the opened [`Workspace`](modsync::repository::Workspace) and
//! calls into the `modsync` library. Commands that take extra arguments define
//! them in their own `Args` struct; the per-module commands share
//! [`ModuleArgs`].
//!
//! Failed git or install steps are reported by the library as they happen and
//! never turn into a failing exit status.

use clap::Args;

use modsync::module_name::Scope;

pub mod checkout;
pub mod clean;
pub mod completions;
pub mod list;
pub mod pull;
pub mod remove;
pub mod sync;

/// Arguments shared by the per-module commands
#[derive(Args, Debug)]
pub struct ModuleArgs {
    /// Only operate on this submodule (a trailing slash is ignored)
    #[arg(value_name = "MODULE")]
    pub module: Option<String>,
}

impl ModuleArgs {
    pub fn scope(&self) -> Scope {
        Scope::from_arg(self.module.as_deref())
    }
}
