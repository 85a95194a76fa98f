//! `PaneNode`: n-ary tree structure for arbitrary pane nesting.

use super::common::{PaneId, SplitDirection};
use serde::{Deserialize, Serialize};

/// Tree node for pane layout
///
/// The pane tree is an n-ary tree where:
/// - Leaf nodes name a single pane
/// - Branch nodes hold two or more children laid out along one direction,
///   each with a share of the branch's extent
///
/// Nodes are immutable values: every edit in [`crate::pane::tree_ops`]
/// produces a new tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaneNode {
    /// A leaf node for one terminal pane
    Leaf { pane_id: PaneId },
    /// A branch laying out its children side by side or stacked
    Branch {
        /// Direction of the split
        direction: SplitDirection,
        /// Child nodes, top-to-bottom or left-to-right
        children: Vec<PaneNode>,
        /// Share of the branch given to each child; same length as
        /// `children` and summing to 1.0
        ratios: Vec<f64>,
    },
}

impl PaneNode {
    /// Create a new leaf node
    pub fn leaf(pane_id: PaneId) -> Self {
        PaneNode::Leaf { pane_id }
    }

    /// Create a branch with equal shares for every child
    pub fn even_branch(direction: SplitDirection, children: Vec<PaneNode>) -> Self {
        let n = children.len().max(1);
        let mut ratios = vec![1.0 / n as f64; children.len()];
        absorb_rounding(&mut ratios);
        PaneNode::Branch {
            direction,
            children,
            ratios,
        }
    }

    /// Check if this is a leaf node
    pub fn is_leaf(&self) -> bool {
        matches!(self, PaneNode::Leaf { .. })
    }

    /// Pane id if this is a leaf node
    pub fn pane_id(&self) -> Option<PaneId> {
        match self {
            PaneNode::Leaf { pane_id } => Some(*pane_id),
            PaneNode::Branch { .. } => None,
        }
    }

    /// Get all pane IDs in this subtree, depth-first
    pub fn all_pane_ids(&self) -> Vec<PaneId> {
        let mut ids = Vec::new();
        self.collect_pane_ids(&mut ids);
        ids
    }

    fn collect_pane_ids(&self, out: &mut Vec<PaneId>) {
        match self {
            PaneNode::Leaf { pane_id } => out.push(*pane_id),
            PaneNode::Branch { children, .. } => {
                for child in children {
                    child.collect_pane_ids(out);
                }
            }
        }
    }

    /// Count total number of panes
    pub fn pane_count(&self) -> usize {
        match self {
            PaneNode::Leaf { .. } => 1,
            PaneNode::Branch { children, .. } => children.iter().map(PaneNode::pane_count).sum(),
        }
    }

    /// Whether a leaf with this id exists in the subtree
    pub fn contains(&self, id: PaneId) -> bool {
        match self {
            PaneNode::Leaf { pane_id } => *pane_id == id,
            PaneNode::Branch { children, .. } => children.iter().any(|c| c.contains(id)),
        }
    }

    /// Last pane in depth-first order
    pub fn last_pane_id(&self) -> Option<PaneId> {
        match self {
            PaneNode::Leaf { pane_id } => Some(*pane_id),
            PaneNode::Branch { children, .. } => children.last().and_then(PaneNode::last_pane_id),
        }
    }
}

/// Recompute the last ratio as `1.0 - sum(others)` so the list sums to
/// exactly 1.0 regardless of accumulated rounding.
pub(crate) fn absorb_rounding(ratios: &mut [f64]) {
    if let Some((last, rest)) = ratios.split_last_mut() {
        *last = 1.0 - rest.iter().sum::<f64>();
    }
}
