//! Best-effort step runner.
//!
//! Every per-module operation is a fixed sequence of external calls. A failed
//! call is logged and counted, and the sequence moves on to the next step;
//! nothing is retried and nothing unwinds.

use log::error;

use crate::error::Result;
use crate::module_name::ModuleName;

/// Runs the steps for one module and tallies failures.
#[derive(Debug)]
pub struct Steps<'a> {
    module: &'a ModuleName,
    failures: usize,
}

impl<'a> Steps<'a> {
    pub fn new(module: &'a ModuleName) -> Self {
        Self {
            module,
            failures: 0,
        }
    }

    /// Run one step. Returns whether it succeeded.
    pub fn run(&mut self, label: &str, step: impl FnOnce() -> Result<()>) -> bool {
        let outcome = step();
        self.record(label, outcome).is_some()
    }

    /// Record the outcome of a step that produced a value.
    pub fn record<T>(&mut self, label: &str, outcome: Result<T>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(e) => {
                error!("{}: {} failed: {}", self.module, label, e);
                self.failures += 1;
                None
            }
        }
    }

    pub fn failures(&self) -> usize {
        self.failures
    }
}
