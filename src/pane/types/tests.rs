//! Tests for PaneNode helpers and SplitDirection.

use super::common::SplitDirection;
use super::pane_node::{PaneNode, absorb_rounding};

#[test]
fn test_even_branch_sums_to_one() {
    let node = PaneNode::even_branch(
        SplitDirection::Vertical,
        vec![PaneNode::leaf(1), PaneNode::leaf(2), PaneNode::leaf(3)],
    );
    match node {
        PaneNode::Branch { ratios, .. } => {
            assert_eq!(ratios.len(), 3);
            let sum: f64 = ratios.iter().sum();
            assert!((sum - 1.0).abs() < 1e-12);
        }
        PaneNode::Leaf { .. } => panic!("expected a branch"),
    }
}

#[test]
fn test_last_pane_id() {
    let node = PaneNode::even_branch(
        SplitDirection::Horizontal,
        vec![
            PaneNode::leaf(4),
            PaneNode::even_branch(
                SplitDirection::Vertical,
                vec![PaneNode::leaf(5), PaneNode::leaf(6)],
            ),
        ],
    );
    assert_eq!(node.last_pane_id(), Some(6));
    assert_eq!(PaneNode::leaf(9).last_pane_id(), Some(9));
    assert_eq!(node.pane_id(), None);
}

#[test]
fn test_absorb_rounding() {
    let mut ratios = vec![0.1, 0.2, 0.3];
    absorb_rounding(&mut ratios);
    assert!((ratios[2] - 0.7).abs() < 1e-12);
}

#[test]
fn test_pane_node_yaml_shape() {
    let node = PaneNode::even_branch(
        SplitDirection::Vertical,
        vec![PaneNode::leaf(1), PaneNode::leaf(2)],
    );
    let yaml = serde_yaml_ng::to_string(&node).unwrap();
    let parsed: PaneNode = serde_yaml_ng::from_str(&yaml).unwrap();
    assert_eq!(parsed, node);
}

#[test]
fn test_split_direction_clone() {
    let dir = SplitDirection::Horizontal;
    let cloned = dir;
    assert_eq!(dir, cloned);
}
