// src/watch/mod.rs

//! File watching.
//!
//! This module wires up a cross-platform filesystem watcher (`notify`) and
//! turns file creations/modifications under an observed directory into
//! runtime events.
//!
//! It does **not** know what a changed file means; the runtime decides
//! (currently: load its contents into the server).

pub mod observer;

pub use observer::DirectoryObserver;
