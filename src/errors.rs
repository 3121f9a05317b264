// src/errors.rs

//! Crate-wide error types and aliases.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServmuxError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server is not running!")]
    NotRunning,

    #[error("Server is already running!")]
    AlreadyRunning,

    #[error("Cannot load invalid path: {0}")]
    InvalidPath(PathBuf),

    #[error("No such procedure: {0}")]
    UnknownProcedure(String),

    #[error("Procedure failed: {0}")]
    Procedure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ServmuxError>;
