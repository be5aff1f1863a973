//! # Error Handling
//!
//! This module defines the centralized error type for `modsync`. It uses the
//! `thiserror` library to describe every failure the library can report, with
//! enough context (command line, working directory, captured stderr) for the
//! message to stand on its own in the diagnostic stream.
//!
//! Most of these errors are *not* fatal. The per-module operations record a
//! failed step and carry on with the next one; only an unresolvable source
//! revision in `sync` and a malformed configuration file stop an invocation.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for modsync operations
#[derive(Error, Debug)]
pub enum Error {
    /// The `.modsync.yaml` configuration file could not be parsed.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A git command ran but exited unsuccessfully.
    #[error("Git command failed in {}: {command} - {stderr}", cwd.display())]
    GitCommand {
        command: String,
        cwd: PathBuf,
        stderr: String,
    },

    /// The git executable could not be started at all.
    #[error("Could not run git in {}: {message}", cwd.display())]
    GitSpawn { cwd: PathBuf, message: String },

    /// The dependency installer exited unsuccessfully or could not start.
    #[error("Dependency installation failed in {}: {command} - {message}", cwd.display())]
    Install {
        command: String,
        cwd: PathBuf,
        message: String,
    },

    /// The revision of the module being propagated could not be resolved.
    #[error("Could not resolve the current revision of `{module}`: {message}")]
    RevisionUnresolved { module: String, message: String },

    /// A module directory exists but is not an initialized checkout.
    #[error("Not an initialized checkout: {}", path.display())]
    NotACheckout { path: PathBuf },

    /// Output that should have been an object id was not one.
    #[error("Invalid revision: {value:?}")]
    InvalidRevision { value: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
