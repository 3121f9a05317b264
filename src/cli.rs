// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `servmux`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "servmux",
    version,
    about = "Supervise a game server, multiplexing console, jobs and file changes into its stdin.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Servmux.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Servmux.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SERVMUX_LOG` or a default level will be used.
    #[arg(long = "log", value_enum, value_name = "LEVEL")]
    pub log: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
