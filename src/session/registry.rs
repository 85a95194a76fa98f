//! One-to-one mapping between panes and their backend processes.

use crate::pane::PaneId;
use cosmos_term_pty::ProcessHandle;
use std::collections::HashMap;

/// Pane ↔ process handle registry owned by the session controller.
///
/// Binding either side again replaces the old pairing on both sides, so the
/// mapping stays one-to-one.
#[derive(Debug, Default)]
pub struct ProcessRegistry {
    by_pane: HashMap<PaneId, ProcessHandle>,
    by_handle: HashMap<ProcessHandle, PaneId>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, pane: PaneId, handle: ProcessHandle) {
        if let Some(old) = self.by_pane.insert(pane, handle) {
            self.by_handle.remove(&old);
        }
        if let Some(old) = self.by_handle.insert(handle, pane)
            && old != pane
        {
            self.by_pane.remove(&old);
        }
    }

    pub fn handle_for(&self, pane: PaneId) -> Option<ProcessHandle> {
        self.by_pane.get(&pane).copied()
    }

    pub fn pane_for(&self, handle: ProcessHandle) -> Option<PaneId> {
        self.by_handle.get(&handle).copied()
    }

    /// Drop the pairing for `pane`, returning its handle.
    pub fn unbind_pane(&mut self, pane: PaneId) -> Option<ProcessHandle> {
        let handle = self.by_pane.remove(&pane)?;
        self.by_handle.remove(&handle);
        Some(handle)
    }

    /// Drop the pairing for `handle`, returning its pane.
    pub fn unbind_handle(&mut self, handle: ProcessHandle) -> Option<PaneId> {
        let pane = self.by_handle.remove(&handle)?;
        self.by_pane.remove(&pane);
        Some(pane)
    }

    pub fn len(&self) -> usize {
        self.by_pane.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pane.is_empty()
    }
}
