// src/engine/runtime.rs

use std::path::Path;

use tracing::{debug, error, info};

use crate::console::ConsoleReader;
use crate::engine::commands::{self, ConsoleCommand};
use crate::engine::event::{Event, EventReceiver};
use crate::engine::procedures::ProcedureRegistry;
use crate::errors::{Result, ServmuxError};
use crate::jobs::CommandSequenceJob;
use crate::server::ServerControl;
use crate::term;
use crate::watch::DirectoryObserver;

/// The main dispatch runtime.
///
/// Responsibilities:
/// - Consume [`Event`]s from the console reader, jobs and observers, one at
///   a time, in arrival order.
/// - Route each event to its handler; a failing handler is reported and the
///   loop continues.
/// - On [`Event::Exit`], run the shutdown sequence and terminate the loop.
///
/// Generic over [`ServerControl`] so tests can drive the loop against a
/// fake server backend.
pub struct Runtime<S: ServerControl> {
    server: S,
    console: Option<ConsoleReader>,
    jobs: Vec<CommandSequenceJob>,
    observers: Vec<DirectoryObserver>,
    procedures: ProcedureRegistry,

    /// Unified event stream from all producers.
    events_rx: EventReceiver,
}

impl<S: ServerControl> Runtime<S> {
    pub fn new(
        server: S,
        console: Option<ConsoleReader>,
        jobs: Vec<CommandSequenceJob>,
        observers: Vec<DirectoryObserver>,
        procedures: ProcedureRegistry,
        events_rx: EventReceiver,
    ) -> Self {
        Self {
            server,
            console,
            jobs,
            observers,
            procedures,
            events_rx,
        }
    }

    /// Main event loop.
    ///
    /// Runs until the `Exit` handler has completed the shutdown sequence.
    /// Errors from other handlers are contained: reported to the operator
    /// and logged, never propagated past the loop. The final "stopped"
    /// notice is emitted exactly once, whatever ended the loop.
    pub async fn run(mut self) -> Result<()> {
        info!("servmux runtime started");

        let mut result = Ok(());

        while let Some(event) = self.events_rx.recv().await {
            debug!(?event, "runtime received event");

            let keep_running = match event {
                Event::Input(line) => {
                    let res = self.handle_input(&line).await;
                    report_contained(res);
                    true
                }
                Event::JobFired { title, text } => {
                    let res = self.handle_job_fired(&title, &text).await;
                    report_contained(res);
                    true
                }
                Event::FileChanged(path) => {
                    let res = self.load_file(&path).await;
                    report_contained(res);
                    true
                }
                Event::Exit => {
                    // The exit handler must complete; its outcome is
                    // returned after the loop, never swallowed.
                    result = self.handle_exit().await;
                    false
                }
            };

            if !keep_running {
                break;
            }
        }

        term::info("servmux has stopped.");
        info!("servmux runtime exiting");
        result
    }

    /// Route one line of operator input.
    async fn handle_input(&mut self, line: &str) -> Result<()> {
        let Some(command) = commands::parse(line) else {
            return Ok(());
        };

        match command {
            ConsoleCommand::Start => self.server.start().await,
            ConsoleCommand::Restart => self.server.restart().await,
            ConsoleCommand::Echo(msg) => {
                term::info(msg);
                Ok(())
            }
            ConsoleCommand::Send(cmd) => self.send(&cmd).await,
            ConsoleCommand::Load(path) => self.load(Path::new(&path)).await,
            ConsoleCommand::Run(argline) => self.run_procedure(&argline).await,
            ConsoleCommand::Raw(line) => self.send(&line).await,
        }
    }

    /// A job interval elapsed: announce it and pipe the prepared command
    /// group to the server.
    async fn handle_job_fired(&mut self, title: &str, text: &str) -> Result<()> {
        term::info(format!("Running command sequence: {title}"));
        self.server.write(text).await
    }

    /// Send one command line, newline-terminated.
    async fn send(&mut self, cmd: &str) -> Result<()> {
        self.server.write(&format!("{cmd}\n")).await
    }

    /// `load <path>`: a file is piped as-is; a directory pipes each
    /// contained file in name order.
    async fn load(&mut self, path: &Path) -> Result<()> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            self.load_dir(path).await
        } else {
            Err(ServmuxError::InvalidPath(path.to_path_buf()))
        }
    }

    /// Pipe the exact contents of `path` to the server's stdin.
    async fn load_file(&mut self, path: &Path) -> Result<()> {
        term::info(format!("Loading file: {}", path.display()));
        let contents = tokio::fs::read_to_string(path).await?;
        self.server.write(&contents).await
    }

    async fn load_dir(&mut self, path: &Path) -> Result<()> {
        term::info(format!("Loading directory: {}", path.display()));

        let mut entries = Vec::new();
        let mut dir = tokio::fs::read_dir(path).await?;
        while let Some(entry) = dir.next_entry().await? {
            entries.push(entry.path());
        }
        entries.sort();

        for entry in entries {
            if entry.is_file() {
                self.load_file(&entry).await?;
            }
        }
        Ok(())
    }

    /// `run <name> [params]`: resolve a statically registered procedure and
    /// send each command it yields.
    async fn run_procedure(&mut self, argline: &str) -> Result<()> {
        let argline = argline.trim();
        let (name, params) = match argline.split_once(char::is_whitespace) {
            Some((name, params)) => (name, params.trim_start()),
            None => (argline, ""),
        };
        if name.is_empty() {
            return Err(ServmuxError::Procedure(
                "usage: run <name> [params]".to_string(),
            ));
        }

        let procedure = self.procedures.resolve(name)?;
        term::warn(format!("Running procedure {name} with parameters: '{params}'"));

        for command in procedure(params)? {
            self.send(&command).await?;
        }
        Ok(())
    }

    /// Shutdown sequence. Strictly ordered; each step completes before the
    /// next begins.
    async fn handle_exit(&mut self) -> Result<()> {
        term::info("Stopping servmux...");

        // (1) The console reader. Cancelling before joining means this
        // cannot hang on a blocked read when exit came from another
        // producer.
        term::info("Cleaning up console...");
        if let Some(console) = self.console.take() {
            console.stop();
            console.join().await;
        }

        // (2) The server, if running. A failure here is remembered but must
        // not leak the jobs and observers below.
        let stop_result = if self.server.is_running() {
            self.server.stop().await
        } else {
            Ok(())
        };
        if let Err(err) = &stop_result {
            error!(error = ?err, "failed to stop server during shutdown");
            term::error(format!("Failed to stop server: {err}"));
        }

        // (3) Jobs.
        if !self.jobs.is_empty() {
            term::info(format!("Cleaning up {} job(s)...", self.jobs.len()));
        }
        for job in self.jobs.drain(..) {
            job.stop();
            job.join().await;
        }

        // (4) Observers.
        if !self.observers.is_empty() {
            term::info(format!("Cleaning up {} observer(s)...", self.observers.len()));
        }
        for observer in self.observers.drain(..) {
            observer.stop();
            observer.join().await;
        }

        stop_result
    }
}

/// Report a contained handler failure: the loop keeps running.
fn report_contained(res: Result<()>) {
    if let Err(err) = res {
        error!(error = ?err, "event handler failed");
        term::error(format!("Event resulted in an error: {err}"));
    }
}
