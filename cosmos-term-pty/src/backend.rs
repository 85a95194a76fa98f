//! Backend process contract shared by the PTY service and the session core.

use crate::error::PtyError;
use cosmos_term_config::PaneId;
use std::fmt;
use std::path::PathBuf;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// Opaque identifier for a spawned backend process. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessHandle(u64);

impl ProcessHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pty-{}", self.0)
    }
}

/// Everything needed to start one pane's shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    /// Pane the process will be bound to
    pub pane: PaneId,
    /// Working directory (the project path)
    pub cwd: PathBuf,
    /// Shell path or allowlisted name; `None` uses the default shell
    pub shell: Option<String>,
    /// Extra arguments passed to the shell
    pub args: Vec<String>,
    /// Spawn the user's shell as a login shell, ignoring `shell`/`args`
    pub login_shell: bool,
    pub rows: u16,
    pub cols: u16,
}

/// Result of a successful spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnedProcess {
    pub handle: ProcessHandle,
    /// Child pid, 0 when the platform does not report one
    pub pid: u32,
}

/// Events pushed from the backend to the session core.
#[derive(Debug)]
pub enum BackendEvent {
    /// A spawn requested through [`ProcessBackend::spawn`] finished.
    Spawned {
        pane: PaneId,
        result: Result<SpawnedProcess, PtyError>,
    },
    /// Raw bytes read from the process's PTY.
    Output { handle: ProcessHandle, data: Vec<u8> },
    /// The process exited; `code` is `None` when the wait itself failed.
    Exited {
        handle: ProcessHandle,
        code: Option<u32>,
    },
}

pub type BackendEventSender = UnboundedSender<BackendEvent>;
pub type BackendEventReceiver = UnboundedReceiver<BackendEvent>;

/// Create the push channel between a backend and the session core.
pub fn event_channel() -> (BackendEventSender, BackendEventReceiver) {
    unbounded_channel()
}

/// Contract for the service that owns backend processes.
///
/// `spawn` is asynchronous: it returns immediately and the outcome arrives as
/// [`BackendEvent::Spawned`]. The remaining calls are synchronous and
/// best-effort; callers log their errors rather than propagating them.
pub trait ProcessBackend {
    /// Start a process for `request.pane`.
    fn spawn(&self, request: SpawnRequest);

    /// Send input bytes to the process.
    fn write(&self, handle: ProcessHandle, data: &[u8]) -> Result<(), PtyError>;

    /// Change the PTY window size.
    fn resize(&self, handle: ProcessHandle, rows: u16, cols: u16) -> Result<(), PtyError>;

    /// Terminate the process and release its PTY.
    fn kill(&self, handle: ProcessHandle) -> Result<(), PtyError>;
}
