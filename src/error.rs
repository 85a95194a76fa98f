//! Typed error types for the session core.
//!
//! Event handlers in the core never return errors; these types surface from
//! the few fallible entry points (tree validation, renderer backend setup) so
//! callers can match on the failure instead of parsing `anyhow` strings.

use crate::pane::PaneId;
use thiserror::Error;

/// A pane tree that breaks one of the layout invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaneTreeError {
    /// A branch holds fewer than two children.
    #[error("branch has {0} children; at least 2 are required")]
    TooFewChildren(usize),

    /// A branch's ratio list does not line up with its children.
    #[error("branch has {children} children but {ratios} ratios")]
    RatioCountMismatch {
        /// Number of child nodes.
        children: usize,
        /// Number of ratio entries.
        ratios: usize,
    },

    /// A ratio is negative, zero, or not finite.
    #[error("invalid split ratio {0}")]
    InvalidRatio(f64),

    /// A branch's ratios do not sum to 1.0.
    #[error("split ratios sum to {0}, expected 1.0")]
    RatioSum(f64),

    /// The same pane id appears in more than one leaf.
    #[error("pane {0} appears more than once")]
    DuplicatePane(PaneId),
}

/// Failures reported by a renderer backend.
#[derive(Debug, Error)]
pub enum RendererError {
    /// The accelerated backend could not be initialised.
    #[error("accelerated renderer unavailable: {0}")]
    AcceleratedUnavailable(String),

    /// The renderer has already been disposed.
    #[error("renderer disposed")]
    Disposed,

    /// Writing to the renderer's output failed.
    #[error("renderer I/O error: {0}")]
    Io(#[from] std::io::Error),
}
