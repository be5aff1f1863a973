//! # modsync
//!
//! This library provides the core functionality behind the `modsync`
//! command-line tool, which manages a repository's git submodules: listing,
//! checking out, pulling, cleaning and removing them, and propagating a shared
//! submodule's revision to the other submodules that embed it.
//!
//! ## Quick Example
//!
//! ```
//! use modsync::manifest;
//! use modsync::module_name::{ModuleName, Scope};
//!
//! let modules = manifest::parse_modules(
//!     "[submodule \"libs/core\"]\n\tpath = libs/core\n[submodule \"libs/ui\"]\n",
//! );
//! assert_eq!(modules.len(), 2);
//!
//! let scope = Scope::from_arg(Some("libs/ui/"));
//! assert!(scope.includes(&ModuleName::new("libs/ui")));
//! assert!(!scope.includes(&modules[0]));
//! ```
//!
//! ## Core Concepts
//!
//! - **Manifests (`manifest`, `branches`)**: The `.gitmodules` file declares the
//!   modules of a repository; an optional `.gitbranches` file names a branch to
//!   switch each module to on checkout. Both readers treat a missing file as
//!   an empty collection.
//! - **Workspace (`repository`, `git`, `installer`)**: An explicit repository
//!   root plus the external collaborators every operation goes through. Git
//!   is reached through the `GitOperations` trait so tests can record calls.
//! - **Operations (`operations`, `runner`)**: Per-module step sequences that run
//!   best effort: a failed step is logged and the rest still run.
//! - **Propagation (`propagate`)**: `sync` discovers which modules embed a given
//!   module by reading their own manifests, then rewrites their index entry
//!   for it to the module's current revision.

pub mod branches;
pub mod config;
pub mod defaults;
pub mod error;
pub mod git;
pub mod installer;
pub mod manifest;
pub mod module_name;
pub mod operations;
pub mod output;
pub mod propagate;
pub mod repository;
pub mod runner;

#[cfg(test)]
mod module_name_proptest;
#[cfg(test)]
mod testing;
