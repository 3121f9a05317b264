// src/watch/observer.rs

use std::path::PathBuf;

use notify::{Config, Event as NotifyEvent, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::engine::{Event, EventSender};
use crate::errors::{Result, ServmuxError};

/// Watches one directory and converts file creations and modifications into
/// [`Event::FileChanged`].
///
/// The underlying `notify` watcher delivers events on its own thread; they
/// are bridged through an unbounded channel into a forwarding task, which is
/// the part that `stop()`/`join()` control. Dropping the observer (after
/// `join`) releases the watcher itself.
#[derive(Debug)]
pub struct DirectoryObserver {
    path: PathBuf,
    cancel: CancellationToken,
    forward: JoinHandle<()>,
    // Kept alive for as long as the observer exists; dropping it stops
    // file watching.
    _watcher: RecommendedWatcher,
}

impl DirectoryObserver {
    /// Start watching `path`, pushing an event per created/modified file.
    ///
    /// Fails with `InvalidPath` if the path cannot be watched (missing or
    /// unreadable); callers surface that as a non-fatal error.
    pub fn spawn(events: EventSender, path: impl Into<PathBuf>, recursive: bool) -> Result<Self> {
        let path = path.into();

        // Channel from the blocking notify callback into the async world.
        let (notify_tx, mut notify_rx) = mpsc::unbounded_channel::<NotifyEvent>();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<NotifyEvent>| match res {
                Ok(event) => {
                    let _ = notify_tx.send(event);
                }
                Err(err) => {
                    // We can't log via tracing here easily, so fall back to stderr.
                    eprintln!("servmux: file watch error: {err}");
                }
            },
            Config::default(),
        )
        .map_err(|err| watch_error(&path, err))?;

        let mode = if recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher
            .watch(&path, mode)
            .map_err(|err| watch_error(&path, err))?;

        info!(path = ?path, recursive, "directory observer started");

        let cancel = CancellationToken::new();
        let forward_cancel = cancel.clone();

        let forward = tokio::spawn(async move {
            loop {
                let event = tokio::select! {
                    _ = forward_cancel.cancelled() => break,
                    event = notify_rx.recv() => match event {
                        Some(event) => event,
                        None => break,
                    },
                };

                if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                    continue;
                }

                for path in event.paths {
                    debug!(path = ?path, "file change observed");
                    if events.send(Event::FileChanged(path)).is_err() {
                        // Runtime is gone; no point keeping the loop alive.
                        return;
                    }
                }
            }

            debug!("observer forwarding loop ended");
        });

        Ok(Self {
            path,
            cancel,
            forward,
            _watcher: watcher,
        })
    }

    /// Observed directory path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Signal the forwarding task to stop.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Wait for the forwarding task to finish, then release the watcher.
    pub async fn join(self) {
        if let Err(err) = self.forward.await {
            warn!(path = ?self.path, error = %err, "observer task panicked");
        }
    }
}

fn watch_error(path: &std::path::Path, err: notify::Error) -> ServmuxError {
    warn!(path = ?path, error = %err, "cannot watch path");
    ServmuxError::InvalidPath(path.to_path_buf())
}
