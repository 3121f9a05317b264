// src/server/supervisor.rs

use std::process::Stdio;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::errors::{Result, ServmuxError};
use crate::term;

/// Control surface the runtime uses to drive the server process.
///
/// [`ProcessSupervisor`] is the real implementation; tests substitute a fake
/// that records calls instead of spawning a child.
#[allow(async_fn_in_trait)]
pub trait ServerControl {
    /// Spawn the child process. Fails with `AlreadyRunning` if one exists.
    async fn start(&mut self) -> Result<()>;

    /// Ask the child to stop and wait for it to exit. Fails with
    /// `NotRunning` if there is no child.
    async fn stop(&mut self) -> Result<()>;

    /// `stop()` followed by `start()`.
    async fn restart(&mut self) -> Result<()> {
        self.stop().await?;
        self.start().await
    }

    /// Write `text` verbatim to the child's stdin. Fails with `NotRunning`
    /// if there is no child; in that case no I/O stream is touched.
    async fn write(&mut self, text: &str) -> Result<()>;

    /// Whether a child process is currently running, per the supervisor's
    /// own lifecycle transitions.
    fn is_running(&self) -> bool;
}

/// Owns the server child process, its stdin, and the output-relay task.
///
/// Invariants:
/// - at most one child process exists at any time
/// - all writes to the child's stdin go through one mutex, so command text
///   from different producers never interleaves
/// - `is_running()` reflects `start()`/`stop()` transitions only, not the
///   liveness of any background task
pub struct ProcessSupervisor {
    program: String,
    state: ServerState,
}

enum ServerState {
    Stopped,
    Running(RunningServer),
}

struct RunningServer {
    child: Child,
    stdin: Arc<Mutex<ChildStdin>>,
    relay: JoinHandle<()>,
}

impl ProcessSupervisor {
    /// Create a supervisor for the given command line. Nothing is spawned
    /// until [`ServerControl::start`] is called.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            state: ServerState::Stopped,
        }
    }

    fn spawn_child(&self) -> Result<Child> {
        let mut parts = self.program.split_whitespace();
        let bin = parts.next().ok_or_else(|| {
            ServmuxError::Config("`program` must be a non-empty command line".to_string())
        })?;

        let child = Command::new(bin)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;

        Ok(child)
    }
}

impl ServerControl for ProcessSupervisor {
    async fn start(&mut self) -> Result<()> {
        if self.is_running() {
            return Err(ServmuxError::AlreadyRunning);
        }

        term::info("Starting server...");
        info!(program = %self.program, "spawning server process");

        let mut child = self.spawn_child()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ServmuxError::Config("server child has no stdin pipe".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ServmuxError::Config("server child has no stdout pipe".to_string()))?;

        // Relay server output line-by-line until EOF.
        let relay = tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                term::server_line(&line);
            }
            debug!("server output relay ended");
        });

        self.state = ServerState::Running(RunningServer {
            child,
            stdin: Arc::new(Mutex::new(stdin)),
            relay,
        });

        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        if !self.is_running() {
            return Err(ServmuxError::NotRunning);
        }

        term::info("Stopping server...");
        if let Err(err) = self.write("stop\n").await {
            // A crashed child closes its stdin; still reap it below.
            warn!(error = %err, "failed to send stop command");
        }

        let ServerState::Running(mut running) =
            std::mem::replace(&mut self.state, ServerState::Stopped)
        else {
            unreachable!("checked is_running above");
        };

        term::info("Waiting for server to stop...");
        let status = running.child.wait().await?;
        info!(?status, "server process exited");

        if let Err(err) = running.relay.await {
            warn!(error = %err, "server output relay task panicked");
        }

        term::info("Server has stopped.");
        Ok(())
    }

    async fn write(&mut self, text: &str) -> Result<()> {
        let ServerState::Running(running) = &self.state else {
            return Err(ServmuxError::NotRunning);
        };

        let mut stdin = running.stdin.lock().await;
        stdin.write_all(text.as_bytes()).await?;
        stdin.flush().await?;
        Ok(())
    }

    fn is_running(&self) -> bool {
        matches!(self.state, ServerState::Running(_))
    }
}
