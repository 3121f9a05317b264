// src/engine/event.rs

use std::path::PathBuf;

use tokio::sync::mpsc;

/// Events sent into the runtime from the console reader, jobs, observers,
/// or external signals.
///
/// The idea is that:
/// - the console reader sends `Input` (or `Exit` on an exit token)
/// - jobs send `JobFired`
/// - directory observers send `FileChanged`
/// - Ctrl-C handling sends `Exit`
///
/// The enum is closed and matched exhaustively by the runtime, so adding a
/// variant forces every dispatch site to be updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// One line of operator input that was not an exit token.
    Input(String),

    /// A job interval elapsed; `text` is the whole command group, already
    /// newline-terminated.
    JobFired { title: String, text: String },

    /// A file was created or modified under an observed directory.
    FileChanged(PathBuf),

    /// Tear everything down and stop the runtime loop.
    Exit,
}

/// Producer half of the event queue.
///
/// Unbounded so that `send` never blocks; this matters for the `notify`
/// callback, which runs on a thread where we cannot await.
pub type EventSender = mpsc::UnboundedSender<Event>;

/// Consumer half of the event queue; owned by the single runtime loop.
pub type EventReceiver = mpsc::UnboundedReceiver<Event>;

/// Create the event queue shared by all producers and the runtime.
pub fn event_queue() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
