// src/jobs/mod.rs

//! Repeating command-sequence jobs.
//!
//! Each job is an independently-timed producer: on every interval it pushes
//! one `Event::JobFired` carrying the current command group, then advances
//! to the next group, wrapping around. Jobs never talk to the server
//! directly; the runtime handles their events.

pub mod command_sequence;

pub use command_sequence::CommandSequenceJob;
