//! Busy/idle activity tracking for sessions.
//!
//! - [`engine`]: the per-session state machine behind the tab indicator
//! - [`window`]: the rolling byte counter used by the volume heuristic

pub mod engine;
pub mod window;

pub use engine::{ActivityEngine, ActivitySignal, ActivityState, ActivityTransition};
pub use window::ActivityWindow;
