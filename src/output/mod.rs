//! Output path from backend process to renderer.
//!
//! - [`pipeline`]: per-pane chunk buffer, flushed once per animation frame
//! - [`viewport`]: the follow-output decision that keeps the view pinned

pub mod pipeline;
pub mod viewport;

pub use pipeline::{FlushOutcome, OutputPipeline};
pub use viewport::FollowState;
