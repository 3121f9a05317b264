// src/server/mod.rs

//! Server process supervision.
//!
//! This module owns the child process: spawning it from the configured
//! command line, relaying its stdout back to the operator, serializing all
//! writes to its stdin, and waiting for it to exit on `stop`.
//!
//! It does **not** decide *what* to write; the runtime's event handlers do
//! that via the [`ServerControl`] trait.

pub mod supervisor;

pub use supervisor::{ProcessSupervisor, ServerControl};
