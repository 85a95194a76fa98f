//! Core types for the pane system.
//!
//! Sub-modules:
//! - [`common`]:    `SplitDirection` and the shared `PaneId` re-export
//! - [`pane_node`]: `PaneNode` n-ary tree for pane layout

mod common;
mod pane_node;

#[cfg(test)]
mod tests;

pub use common::{PaneId, SplitDirection};
pub use pane_node::PaneNode;
pub(crate) use pane_node::absorb_rounding;
