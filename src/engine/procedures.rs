// src/engine/procedures.rs

use std::collections::HashMap;

use crate::errors::{Result, ServmuxError};

/// A named procedure: maps its parameter string to the commands to send.
pub type ProcedureFn = fn(&str) -> Result<Vec<String>>;

/// Statically registered procedures for the `run <name> [params]` command.
///
/// The table is built once at startup; `run` only ever resolves names that
/// were registered there. There is no runtime loading of any kind.
pub struct ProcedureRegistry {
    entries: HashMap<String, ProcedureFn>,
}

impl ProcedureRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registry with the built-in procedures.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("countdown", countdown);
        registry
    }

    /// Register `procedure` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, procedure: ProcedureFn) {
        self.entries.insert(name.into(), procedure);
    }

    /// Look up a procedure by name.
    pub fn resolve(&self, name: &str) -> Result<ProcedureFn> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| ServmuxError::UnknownProcedure(name.to_string()))
    }
}

impl Default for ProcedureRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Built-in: `run countdown [steps]` announces a countdown over `say`.
fn countdown(params: &str) -> Result<Vec<String>> {
    let params = params.trim();
    let steps: u32 = if params.is_empty() {
        3
    } else {
        params.parse().map_err(|_| {
            ServmuxError::Procedure(format!(
                "countdown expects a number of steps, got '{params}'"
            ))
        })?
    };

    Ok((1..=steps).rev().map(|n| format!("say {n}")).collect())
}
