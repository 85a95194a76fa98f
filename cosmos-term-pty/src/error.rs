//! Typed error types for cosmos-term-pty.

use crate::backend::ProcessHandle;
use thiserror::Error;

/// Errors produced by the backend process service.
#[derive(Debug, Error)]
pub enum PtyError {
    /// The pseudo-terminal pair could not be opened.
    #[error("Failed to open PTY: {0}")]
    OpenPty(String),

    /// The shell process could not be started inside the PTY.
    #[error("Failed to spawn shell: {0}")]
    Spawn(String),

    /// The configured shell path failed validation.
    #[error("Invalid shell: {0}")]
    ShellPath(String),

    /// No live process is registered under this handle.
    #[error("Process not found: {0}")]
    NotFound(ProcessHandle),

    /// The process exists but its PTY side has already been closed.
    #[error("Process closed: {0}")]
    Closed(ProcessHandle),

    /// Reading or writing the PTY failed.
    #[error("PTY I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The PTY rejected a window-size change.
    #[error("Resize error: {0}")]
    Resize(String),
}
