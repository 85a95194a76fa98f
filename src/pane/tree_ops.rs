//! Pure edit and query functions over [`PaneNode`] trees.
//!
//! Every function takes the current tree by reference and returns a new one;
//! nothing here owns state. The session controller keeps the current root and
//! swaps it for the result.

use super::types::{PaneId, PaneNode, SplitDirection, absorb_rounding};
use crate::error::PaneTreeError;
use std::collections::HashSet;

/// Smallest share a pane can be resized down to within its branch
pub const MIN_PANE_SHARE: f64 = 0.1;

/// Ratio sums further than this from 1.0 fail validation
pub const RATIO_EPSILON: f64 = 1e-9;

/// Replace the `target` leaf with a two-child branch holding it and `new_id`.
///
/// The new pane goes first when `before` is set, second otherwise; both get
/// half the space. Returns an unchanged copy when `target` is not in the tree.
pub fn split(
    tree: &PaneNode,
    target: PaneId,
    new_id: PaneId,
    direction: SplitDirection,
    before: bool,
) -> PaneNode {
    match tree {
        PaneNode::Leaf { pane_id } if *pane_id == target => {
            let existing = PaneNode::leaf(target);
            let new = PaneNode::leaf(new_id);
            let children = if before {
                vec![new, existing]
            } else {
                vec![existing, new]
            };
            PaneNode::Branch {
                direction,
                children,
                ratios: vec![0.5, 0.5],
            }
        }
        PaneNode::Leaf { .. } => tree.clone(),
        PaneNode::Branch {
            direction: branch_dir,
            children,
            ratios,
        } => PaneNode::Branch {
            direction: *branch_dir,
            children: children
                .iter()
                .map(|child| split(child, target, new_id, direction, before))
                .collect(),
            ratios: ratios.clone(),
        },
    }
}

/// Result of removing a pane from a subtree
enum RemoveResult {
    /// The pane was found; `None` means the subtree is now empty
    Removed(Option<PaneNode>),
    /// The pane is not in this subtree
    NotFound,
}

/// Remove the leaf for `pane_id`.
///
/// Returns `None` when the tree becomes empty; the caller then creates a
/// fresh leaf with a new pane id. Branches left with a single child collapse
/// into that child, and surviving siblings keep their relative proportions.
/// A missing `pane_id` yields an unchanged copy.
pub fn remove(tree: &PaneNode, pane_id: PaneId) -> Option<PaneNode> {
    match remove_node(tree, pane_id) {
        RemoveResult::Removed(node) => node,
        RemoveResult::NotFound => Some(tree.clone()),
    }
}

fn remove_node(node: &PaneNode, target: PaneId) -> RemoveResult {
    match node {
        PaneNode::Leaf { pane_id } if *pane_id == target => RemoveResult::Removed(None),
        PaneNode::Leaf { .. } => RemoveResult::NotFound,
        PaneNode::Branch {
            direction,
            children,
            ratios,
        } => {
            // Pane ids are unique, so at most one child can contain the target.
            let Some((index, result)) = children
                .iter()
                .enumerate()
                .find_map(|(i, child)| match remove_node(child, target) {
                    RemoveResult::Removed(replacement) => Some((i, replacement)),
                    RemoveResult::NotFound => None,
                })
            else {
                return RemoveResult::NotFound;
            };

            let mut children = children.clone();
            let mut ratios = ratios.clone();
            match result {
                Some(replacement) => {
                    // A nested edit; this branch keeps the same shares.
                    children[index] = replacement;
                    return RemoveResult::Removed(Some(PaneNode::Branch {
                        direction: *direction,
                        children,
                        ratios,
                    }));
                }
                None => {
                    children.remove(index);
                    ratios.remove(index);
                }
            }

            match children.len() {
                0 => RemoveResult::Removed(None),
                1 => RemoveResult::Removed(children.pop()),
                _ => {
                    renormalize(&mut ratios);
                    RemoveResult::Removed(Some(PaneNode::Branch {
                        direction: *direction,
                        children,
                        ratios,
                    }))
                }
            }
        }
    }
}

/// Scale ratios proportionally so they sum to 1.0.
fn renormalize(ratios: &mut [f64]) {
    let total: f64 = ratios.iter().sum();
    if total > 0.0 {
        for r in ratios.iter_mut() {
            *r /= total;
        }
    } else {
        let even = 1.0 / ratios.len() as f64;
        ratios.iter_mut().for_each(|r| *r = even);
    }
    absorb_rounding(ratios);
}

/// All pane ids in depth-first order
pub fn find_leaf_ids(tree: &PaneNode) -> Vec<PaneId> {
    tree.all_pane_ids()
}

/// Whether `pane_id` is a leaf of `tree`
pub fn contains(tree: &PaneNode, pane_id: PaneId) -> bool {
    tree.contains(pane_id)
}

/// Number of leaves in `tree`
pub fn leaf_count(tree: &PaneNode) -> usize {
    tree.pane_count()
}

/// Grow `pane_id`'s share of its parent branch by `delta` (negative shrinks).
///
/// The space is taken from the next sibling, or the previous one when the
/// pane is the last child. Neither share drops below [`MIN_PANE_SHARE`]
/// (shares already smaller than that are left where they are). Returns an
/// unchanged copy when the pane is the root leaf or not in the tree.
pub fn resize(tree: &PaneNode, pane_id: PaneId, delta: f64) -> PaneNode {
    let mut out = tree.clone();
    adjust_share(&mut out, pane_id, delta);
    out
}

fn adjust_share(node: &mut PaneNode, target: PaneId, delta: f64) -> bool {
    let PaneNode::Branch {
        children, ratios, ..
    } = node
    else {
        return false;
    };

    let Some(index) = children.iter().position(|c| c.contains(target)) else {
        return false;
    };

    // Innermost branch wins: try nested branches first.
    if !children[index].is_leaf() {
        return adjust_share(&mut children[index], target, delta);
    }

    if children.len() < 2 || !delta.is_finite() {
        return true;
    }
    let neighbor = if index + 1 < children.len() {
        index + 1
    } else {
        index - 1
    };

    let (own, other) = (ratios[index], ratios[neighbor]);
    let lo = MIN_PANE_SHARE.min(own);
    let hi = own + other - MIN_PANE_SHARE.min(other);
    if hi < lo {
        return true;
    }
    let new_own = (own + delta).clamp(lo, hi);
    ratios[index] = new_own;
    ratios[neighbor] = own + other - new_own;
    absorb_rounding(ratios);

    crate::debug_trace!(
        "PANE_RESIZE",
        "pane {} share {:.3} -> {:.3} (neighbor {:.3} -> {:.3})",
        target,
        own,
        new_own,
        other,
        ratios[neighbor]
    );
    true
}

/// Check every layout invariant of `tree`.
pub fn validate(tree: &PaneNode) -> Result<(), PaneTreeError> {
    let mut seen = HashSet::new();
    validate_node(tree, &mut seen)
}

fn validate_node(node: &PaneNode, seen: &mut HashSet<PaneId>) -> Result<(), PaneTreeError> {
    match node {
        PaneNode::Leaf { pane_id } => {
            if !seen.insert(*pane_id) {
                return Err(PaneTreeError::DuplicatePane(*pane_id));
            }
            Ok(())
        }
        PaneNode::Branch {
            children, ratios, ..
        } => {
            if children.len() < 2 {
                return Err(PaneTreeError::TooFewChildren(children.len()));
            }
            if children.len() != ratios.len() {
                return Err(PaneTreeError::RatioCountMismatch {
                    children: children.len(),
                    ratios: ratios.len(),
                });
            }
            if let Some(bad) = ratios.iter().find(|r| !r.is_finite() || **r <= 0.0) {
                return Err(PaneTreeError::InvalidRatio(*bad));
            }
            let sum: f64 = ratios.iter().sum();
            if (sum - 1.0).abs() > RATIO_EPSILON {
                return Err(PaneTreeError::RatioSum(sum));
            }
            children
                .iter()
                .try_for_each(|child| validate_node(child, seen))
        }
    }
}
