//! Frame-batched output delivery for one pane.

use super::viewport::FollowState;
use crate::intercept::{InterceptEvent, PaneInterceptors};
use crate::traits::Renderer;

/// Chunks received from the backend since the last frame.
#[derive(Debug, Default)]
pub struct OutputPipeline {
    pending: Vec<Vec<u8>>,
    flush_scheduled: bool,
}

/// What one flush did
#[derive(Debug, Default)]
pub struct FlushOutcome {
    /// Bytes received from the backend in this batch
    pub received: usize,
    /// Bytes handed to the renderer after interception
    pub written: usize,
    pub events: Vec<InterceptEvent>,
}

impl OutputPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a chunk. Returns `true` when this schedules a new flush.
    pub fn push(&mut self, chunk: Vec<u8>) -> bool {
        if chunk.is_empty() {
            return false;
        }
        self.pending.push(chunk);
        let newly_scheduled = !self.flush_scheduled;
        self.flush_scheduled = true;
        newly_scheduled
    }

    pub fn is_flush_scheduled(&self) -> bool {
        self.flush_scheduled
    }

    pub fn pending_chunks(&self) -> usize {
        self.pending.len()
    }

    /// Drop buffered output and cancel the scheduled flush.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.flush_scheduled = false;
    }

    /// Take everything queued as one buffer, in arrival order.
    fn take_batch(&mut self) -> Vec<u8> {
        self.flush_scheduled = false;
        if self.pending.len() == 1 {
            return self.pending.pop().unwrap_or_default();
        }
        let total = self.pending.iter().map(Vec::len).sum();
        let mut batch = Vec::with_capacity(total);
        for chunk in self.pending.drain(..) {
            batch.extend_from_slice(&chunk);
        }
        batch
    }

    /// Animation-frame flush.
    ///
    /// Runs the interceptors over the coalesced batch, writes what remains to
    /// the renderer, and re-pins the viewport when the pane was following at
    /// flush time. Returns `None` when no flush was scheduled.
    pub fn flush(
        &mut self,
        interceptors: &mut PaneInterceptors,
        renderer: &mut dyn Renderer,
        follow: &FollowState,
    ) -> Option<FlushOutcome> {
        if !self.flush_scheduled {
            return None;
        }
        let following = follow.follow_output();
        let batch = self.take_batch();
        let received = batch.len();

        let mut events = Vec::new();
        let data = interceptors.process(batch, &mut events);
        if !data.is_empty() {
            renderer.write(&data);
            if following {
                renderer.scroll_to_bottom();
            }
        }

        Some(FlushOutcome {
            received,
            written: data.len(),
            events,
        })
    }
}
