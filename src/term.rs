// src/term.rs

//! Operator-facing terminal output.
//!
//! Everything the operator is meant to read goes through here, to stdout:
//! plain status lines, yellow warnings, red errors, and relayed server
//! output in blue so it stands apart from the wrapper's own messages.
//!
//! Diagnostics for developers go through `tracing` (stderr) instead; see
//! `logging.rs`.

use std::fmt::Display;

use owo_colors::OwoColorize;

/// Print a plain status line.
pub fn info(msg: impl Display) {
    println!("{msg}");
}

/// Print a warning in yellow.
pub fn warn(msg: impl Display) {
    println!("{}", msg.yellow());
}

/// Print an error in red.
pub fn error(msg: impl Display) {
    println!("{}", msg.red());
}

/// Print one relayed line of server output, marked in blue.
pub fn server_line(line: impl Display) {
    println!("{}", line.blue());
}
