// src/jobs/command_sequence.rs

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::CommandSequenceConfig;
use crate::engine::{Event, EventSender};
use crate::errors::{Result, ServmuxError};

/// A self-timed repeating producer of [`Event::JobFired`].
///
/// The timer loop fires immediately, then waits up to `delay` between
/// firings; cancellation wakes the wait early. After `stop()` followed by
/// `join().await`, no further firing occurs.
pub struct CommandSequenceJob {
    title: String,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl CommandSequenceJob {
    /// Validate the config and start the timer task.
    ///
    /// Fails with a configuration error if `groups` is empty (the index
    /// advance is modulo the group count), any group is empty, or `delay`
    /// is not a positive finite number of seconds.
    pub fn spawn(events: EventSender, cfg: &CommandSequenceConfig) -> Result<Self> {
        if cfg.groups.is_empty() {
            return Err(ServmuxError::Config(format!(
                "job '{}': `groups` must contain at least one group",
                cfg.title
            )));
        }
        if cfg.groups.iter().any(|group| group.is_empty()) {
            return Err(ServmuxError::Config(format!(
                "job '{}': groups must not be empty",
                cfg.title
            )));
        }
        if !(cfg.delay.is_finite() && cfg.delay > 0.0) {
            return Err(ServmuxError::Config(format!(
                "job '{}': `delay` must be a positive number of seconds",
                cfg.title
            )));
        }

        let texts: Vec<String> = cfg
            .groups
            .iter()
            .map(|commands| commands.join("\n") + "\n")
            .collect();

        let title = cfg.title.clone();
        let delay = Duration::from_secs_f64(cfg.delay);
        let mut index = cfg.index % texts.len();

        let cancel = CancellationToken::new();
        let loop_title = title.clone();
        let loop_cancel = cancel.clone();

        let handle = tokio::spawn(async move {
            loop {
                if loop_cancel.is_cancelled() {
                    break;
                }

                let fired = events.send(Event::JobFired {
                    title: loop_title.clone(),
                    text: texts[index].clone(),
                });
                if fired.is_err() {
                    // Runtime is gone; nothing left to fire at.
                    debug!(job = %loop_title, "event queue closed, job loop ending");
                    break;
                }

                index = (index + 1) % texts.len();

                tokio::select! {
                    _ = loop_cancel.cancelled() => break,
                    _ = sleep(delay) => {}
                }
            }

            debug!(job = %loop_title, "job loop ended");
        });

        Ok(Self {
            title,
            cancel,
            handle,
        })
    }

    /// Job title from the configuration.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Signal the timer loop to stop; wakes any pending interval wait.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Wait for the timer task to finish.
    pub async fn join(self) {
        if let Err(err) = self.handle.await {
            warn!(job = %self.title, error = %err, "job task panicked");
        }
    }
}
