// src/console/mod.rs

//! Operator console input.
//!
//! A single reader task turns stdin lines into runtime events. Exit tokens
//! (and stdin EOF) emit [`Event::Exit`] and end the task; every other line
//! is pushed as [`Event::Input`] for the runtime's command router.
//!
//! The reader is cancellable: shutdown cancels its token before joining, so
//! the join can never hang on a blocked read when the exit was triggered by
//! another producer.

use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::engine::{Event, EventSender};

/// Trimmed input lines that trigger the exit sequence directly.
pub const EXIT_TOKENS: [&str; 2] = ["exit", "x"];

/// Handle for the console reader task.
pub struct ConsoleReader {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl ConsoleReader {
    /// Start the stdin reader task.
    pub fn spawn(events: EventSender) -> Self {
        let cancel = CancellationToken::new();
        let loop_cancel = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut lines = BufReader::new(io::stdin()).lines();

            loop {
                let line = tokio::select! {
                    _ = loop_cancel.cancelled() => break,
                    line = lines.next_line() => line,
                };

                match line {
                    Ok(Some(line)) => {
                        if EXIT_TOKENS.contains(&line.trim()) {
                            let _ = events.send(Event::Exit);
                            break;
                        }
                        if events.send(Event::Input(line)).is_err() {
                            break;
                        }
                    }
                    // EOF: the console is gone, treat it like an exit token.
                    Ok(None) => {
                        debug!("stdin closed, requesting exit");
                        let _ = events.send(Event::Exit);
                        break;
                    }
                    Err(err) => {
                        warn!(error = %err, "console read failed, requesting exit");
                        let _ = events.send(Event::Exit);
                        break;
                    }
                }
            }

            debug!("console reader ended");
        });

        Self { cancel, handle }
    }

    /// Signal the reader task to stop; wakes a pending read.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Wait for the reader task to finish.
    pub async fn join(self) {
        if let Err(err) = self.handle.await {
            warn!(error = %err, "console reader task panicked");
        }
    }
}
