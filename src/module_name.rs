//! Submodule identifiers and the scope filter applied by per-module commands.
//!
//! A submodule is named by its mount point relative to the repository that
//! embeds it. A trailing path separator is insignificant (`libs/core/` and
//! `libs/core` name the same module), so every name is normalized on the way
//! in and all comparisons happen on the normalized string.

use std::fmt;
use std::path::{Path, PathBuf};

/// A normalized submodule path such as `libs/core`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleName(String);

impl ModuleName {
    /// Create a module name, stripping one trailing path separator.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref();
        let trimmed = raw
            .strip_suffix('/')
            .or_else(|| raw.strip_suffix('\\'))
            .unwrap_or(raw);
        Self(trimmed.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Location of this module's checkout below `root`.
    pub fn path_in(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModuleName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Normalize an optional command-line module argument.
///
/// `None` (no argument) and an argument that is empty once normalized both
/// yield `None`, which downstream scope filters treat as "every module".
pub fn clean_module_name(raw: Option<&str>) -> Option<ModuleName> {
    raw.map(ModuleName::new).filter(|name| !name.0.is_empty())
}

/// Which modules of a manifest a command applies to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    All,
    Only(ModuleName),
}

impl Scope {
    /// Build a scope from a raw command-line argument.
    pub fn from_arg(raw: Option<&str>) -> Self {
        clean_module_name(raw).into()
    }

    pub fn includes(&self, module: &ModuleName) -> bool {
        match self {
            Scope::All => true,
            Scope::Only(target) => target == module,
        }
    }
}

impl From<Option<ModuleName>> for Scope {
    fn from(name: Option<ModuleName>) -> Self {
        match name {
            Some(name) => Scope::Only(name),
            None => Scope::All,
        }
    }
}
