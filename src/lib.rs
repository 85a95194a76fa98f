// Library exports for the session core, its tests and the `cosmos-term` binary.
//
// # Threading
//
// The core is single-threaded: `SessionController` and everything it owns
// live on the caller's thread and are driven by frame and timer callbacks.
// The only cross-thread traffic is the backend event channel fed by the PTY
// reader/waiter threads in `cosmos-term-pty`, which guards its own handle
// map with `parking_lot::Mutex`.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod activity;
pub mod cli;
pub mod error;
pub mod input;
pub mod intercept;
pub mod output;
pub mod pane;
pub mod session;
pub mod traits;

pub use cosmos_term_config as config;
pub use cosmos_term_pty as pty;
