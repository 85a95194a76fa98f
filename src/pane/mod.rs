//! Pane layout for split sessions
//!
//! This module provides the pane infrastructure for split terminals:
//! - `PaneNode`: immutable n-ary tree of splits
//! - `tree_ops`: pure split/remove/resize/query functions over that tree
//! - `PaneId`: unique identifier for each pane

pub mod tree_ops;
mod types;

pub use tree_ops::{contains, find_leaf_ids, leaf_count, remove, resize, split, validate};
pub use types::{PaneId, PaneNode, SplitDirection};
