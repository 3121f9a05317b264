// tests/common/mod.rs

use std::sync::{Arc, Mutex, Once};

use tracing_subscriber::{fmt, EnvFilter};

use servmux::errors::{Result, ServmuxError};
use servmux::server::ServerControl;

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

/// Observable state of a [`FakeServer`].
#[derive(Debug, Default)]
pub struct FakeServerState {
    pub running: bool,
    pub writes: Vec<String>,
    pub start_calls: usize,
    pub stop_calls: usize,
}

/// A fake server backend that:
/// - records every write made while "running"
/// - refuses `start` when running and `stop`/`write` when stopped,
///   with the same errors as the real supervisor.
#[derive(Clone)]
pub struct FakeServer {
    state: Arc<Mutex<FakeServerState>>,
}

impl FakeServer {
    pub fn new(running: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeServerState {
                running,
                ..FakeServerState::default()
            })),
        }
    }

    /// Handle onto the shared state, for assertions after the runtime has
    /// consumed the server.
    pub fn state(&self) -> Arc<Mutex<FakeServerState>> {
        Arc::clone(&self.state)
    }
}

impl ServerControl for FakeServer {
    async fn start(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.running {
            return Err(ServmuxError::AlreadyRunning);
        }
        state.running = true;
        state.start_calls += 1;
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.running {
            return Err(ServmuxError::NotRunning);
        }
        state.running = false;
        state.stop_calls += 1;
        Ok(())
    }

    async fn write(&mut self, text: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.running {
            return Err(ServmuxError::NotRunning);
        }
        state.writes.push(text.to_string());
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.state.lock().unwrap().running
    }
}
