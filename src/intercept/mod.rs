//! Escape-sequence interceptors for the pane output stream.
//!
//! The renderer parses the byte stream itself; these passes only pick out a
//! handful of out-of-band sequences before it sees them:
//!
//! - [`osc133`]: shell-integration prompt marks (read-only, left in place)
//! - [`osc_progress`]: OSC 9;4 progress reports (stripped)
//! - [`kitty`]: Kitty keyboard protocol negotiation (stripped, queries answered)
//!
//! Interceptors do not touch session state. They report what they saw as
//! [`InterceptEvent`]s, which the controller routes to the activity engine
//! and back to the backend.

pub mod kitty;
pub mod osc133;
pub mod osc_progress;

pub use kitty::KittyModeStack;
pub use osc_progress::{Progress, ProgressState};

use std::ops::Range;

const ESC: u8 = 0x1b;

/// Something an interceptor recognised in the output stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptEvent {
    /// The pane emitted a shell-integration or progress sequence
    OscSupported,
    /// The pane reported that a command started
    Busy,
    /// The pane reported that its command finished
    Idle,
    /// OSC 9;4 progress update
    Progress(Progress),
    /// Bytes to send back to the backend process (Kitty query reply)
    KittyReply(Vec<u8>),
}

/// Interceptor state owned by one pane.
#[derive(Debug, Clone)]
pub struct PaneInterceptors {
    kitty: KittyModeStack,
}

impl PaneInterceptors {
    pub fn new(kitty_stack_limit: usize) -> Self {
        Self {
            kitty: KittyModeStack::new(kitty_stack_limit),
        }
    }

    /// Run every interceptor over one flushed batch.
    ///
    /// Returns the bytes the renderer should see; recognised sequences are
    /// appended to `events` in stream order per interceptor.
    pub fn process(&mut self, data: Vec<u8>, events: &mut Vec<InterceptEvent>) -> Vec<u8> {
        if !has_escape(&data) {
            return data;
        }
        osc133::scan(&data, events);
        let data = osc_progress::strip(data, events);
        kitty::strip(data, &mut self.kitty, events)
    }

    /// Kitty keyboard mode stack for key encoding
    pub fn kitty(&self) -> &KittyModeStack {
        &self.kitty
    }

    /// Forget all negotiated state (the process behind the pane is gone).
    pub fn reset(&mut self) {
        self.kitty.clear();
    }
}

/// Fast-path check shared by every interceptor
pub(crate) fn has_escape(data: &[u8]) -> bool {
    data.contains(&ESC)
}

/// Copy `data` without the given ranges in a single pass.
///
/// `ranges` must be sorted and non-overlapping, as produced by a left-to-right
/// regex scan.
pub(crate) fn remove_ranges(data: &[u8], ranges: &[Range<usize>]) -> Vec<u8> {
    let removed: usize = ranges.iter().map(|r| r.len()).sum();
    let mut out = Vec::with_capacity(data.len() - removed);
    let mut cursor = 0;
    for range in ranges {
        out.extend_from_slice(&data[cursor..range.start]);
        cursor = range.end;
    }
    out.extend_from_slice(&data[cursor..]);
    out
}
