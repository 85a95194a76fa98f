//! Shared enums for the pane system.

// Re-export PaneId from cosmos-term-config for shared access across subcrates
pub use cosmos_term_config::PaneId;

/// Direction of a split
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SplitDirection {
    /// Panes are stacked vertically (split creates top/bottom panes)
    Horizontal,
    /// Panes are side by side (split creates left/right panes)
    Vertical,
}
