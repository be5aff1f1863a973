//! # Manifest Reader
//!
//! Reads the submodule declarations out of a `.gitmodules`-style manifest.
//! Only the section headers matter here: every `[submodule "<name>"]` header
//! contributes one module, in file order. Nothing checks that the declared
//! path exists on disk.
//!
//! A manifest that cannot be read is not an error for callers. The failure is
//! logged as a warning and the reader returns an empty module set, so "no
//! manifest" and "no modules declared" look the same downstream.

use std::path::Path;
use std::sync::OnceLock;

use log::warn;
use regex::Regex;

use crate::module_name::ModuleName;

fn section_header() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        Regex::new(r#"\[submodule "([^"]+)"\]"#).expect("submodule header pattern is valid")
    })
}

/// Extract module names from manifest text, preserving declaration order.
pub fn parse_modules(content: &str) -> Vec<ModuleName> {
    section_header()
        .captures_iter(content)
        .map(|captures| ModuleName::new(&captures[1]))
        .collect()
}

/// Read the modules declared by the manifest at `path`.
///
/// Returns an empty list (and logs a warning) if the file cannot be read.
pub fn read_modules(path: &Path) -> Vec<ModuleName> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_modules(&content),
        Err(e) => {
            warn!("Could not read {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Whether `modules` declares `name`.
pub fn declares(modules: &[ModuleName], name: &ModuleName) -> bool {
    modules.iter().any(|module| module == name)
}
