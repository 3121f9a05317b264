// src/config/mod.rs

//! Configuration loading and validation for servmux.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants like positive delays and non-empty command
//!   groups (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{
    CommandSequenceConfig, ConfigFile, DirectoryObserverConfig, JobConfig, ObserverConfig,
    DEFAULT_PROGRAM,
};
pub use validate::validate_config;
