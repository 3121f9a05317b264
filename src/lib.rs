// src/lib.rs

pub mod cli;
pub mod config;
pub mod console;
pub mod engine;
pub mod errors;
pub mod jobs;
pub mod logging;
pub mod server;
pub mod term;
pub mod watch;

use std::path::PathBuf;

use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::{load_and_validate, ConfigFile, JobConfig, ObserverConfig};
use crate::console::ConsoleReader;
use crate::engine::{event_queue, Event, ProcedureRegistry, Runtime};
use crate::errors::Result;
use crate::jobs::CommandSequenceJob;
use crate::server::{ProcessSupervisor, ServerControl};
use crate::watch::DirectoryObserver;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the event queue and runtime
/// - the server supervisor (started immediately)
/// - the console reader, jobs and observers
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = if config_path.exists() {
        load_and_validate(&config_path)?
    } else {
        warn!(path = ?config_path, "configuration file not found, using defaults");
        term::warn(format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        ConfigFile::default()
    };

    let (events_tx, events_rx) = event_queue();

    // The server is started up front; a failure is surfaced but not fatal,
    // the operator can fix things and type `start`.
    let mut server = ProcessSupervisor::new(cfg.program.clone());
    if let Err(err) = server.start().await {
        term::error(format!("Failed to start server: {err}"));
    }

    // Ctrl-C behaves like typing an exit token.
    {
        let events = events_tx.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {err}");
                return;
            }
            let _ = events.send(Event::Exit);
        });
    }

    let console = ConsoleReader::spawn(events_tx.clone());

    // A directory that cannot be watched is an operator error, not a crash.
    let mut observers = Vec::new();
    for observer_cfg in cfg.observers.iter() {
        let ObserverConfig::Directory(dir) = observer_cfg;
        match DirectoryObserver::spawn(events_tx.clone(), dir.path.clone(), dir.recursive) {
            Ok(observer) => observers.push(observer),
            Err(err) => term::error(format!("Cannot observe {}: {err}", dir.path)),
        }
    }

    let mut jobs = Vec::new();
    for job_cfg in cfg.jobs.iter() {
        let JobConfig::CommandSequence(seq) = job_cfg;
        jobs.push(CommandSequenceJob::spawn(events_tx.clone(), seq)?);
    }

    info!(
        jobs = jobs.len(),
        observers = observers.len(),
        "servmux starting"
    );

    let runtime = Runtime::new(
        server,
        Some(console),
        jobs,
        observers,
        ProcedureRegistry::with_builtins(),
        events_rx,
    );
    runtime.run().await
}
