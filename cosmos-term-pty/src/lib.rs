//! PTY backend process service for the cosmos-term session core.
//!
//! This crate owns the pseudo-terminals behind every pane:
//!
//! - [`ProcessBackend`]: the contract the session controller drives (spawn,
//!   write, resize, kill), with completions delivered as [`BackendEvent`]s
//! - [`PtySessionManager`]: the `portable-pty` implementation, one reader
//!   thread and one exit waiter per process
//! - Shell resolution: allowlisted shell names and `$SHELL` validation

pub mod backend;
pub mod error;
pub mod manager;
pub mod shell;

pub use backend::{
    BackendEvent, BackendEventReceiver, BackendEventSender, ProcessBackend, ProcessHandle,
    SpawnRequest, SpawnedProcess, event_channel,
};
pub use error::PtyError;
pub use manager::PtySessionManager;
pub use shell::{default_shell, normalize_shell_path};

// Re-export PaneId so backend callers need not depend on the config crate
pub use cosmos_term_config::PaneId;
