// src/engine/mod.rs

//! Event-dispatch engine for servmux.
//!
//! This module ties together:
//! - the event model and the queue all producers push into
//! - the console command router
//! - the statically registered procedure table
//! - the main runtime loop that reacts to:
//!   - operator input lines
//!   - job firings
//!   - file-change notifications
//!   - exit requests (console exit tokens, stdin EOF, Ctrl-C)

pub mod commands;
pub mod event;
pub mod procedures;
pub mod runtime;

pub use commands::{parse, ConsoleCommand};
pub use event::{event_queue, Event, EventReceiver, EventSender};
pub use procedures::{ProcedureFn, ProcedureRegistry};
pub use runtime::Runtime;
