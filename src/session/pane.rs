//! Per-pane state held by the session controller.

use super::resize_throttle::ResizeThrottle;
use crate::intercept::{PaneInterceptors, Progress};
use crate::output::{FollowState, OutputPipeline};
use crate::traits::{Geometry, Renderer};
use cosmos_term_config::PipelineConfig;
use cosmos_term_pty::ProcessHandle;

/// Where a pane is in its process lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneLifecycle {
    /// Mounted, waiting for the renderer to report a visible size
    AwaitingSize,
    /// Spawn requested with this geometry; completion not yet received
    Spawning { geometry: Geometry },
    /// A live process is bound to the pane
    Bound(ProcessHandle),
    /// The spawn failed; the pane stays visible without a process
    Inert,
    /// The bound process exited with this code
    Exited(Option<u32>),
}

impl PaneLifecycle {
    pub fn handle(self) -> Option<ProcessHandle> {
        match self {
            PaneLifecycle::Bound(handle) => Some(handle),
            _ => None,
        }
    }
}

/// Renderer, output pipeline and protocol state for one mounted pane.
///
/// Disposal removes the controller from the session controller's map, so
/// every timer and buffer it owns goes away in the same step.
pub struct PaneController {
    pub(crate) renderer: Box<dyn Renderer>,
    pub(crate) lifecycle: PaneLifecycle,
    pub(crate) pipeline: OutputPipeline,
    pub(crate) interceptors: PaneInterceptors,
    pub(crate) follow: FollowState,
    pub(crate) throttle: ResizeThrottle,
    /// Last geometry applied locally
    pub(crate) geometry: Option<Geometry>,
    pub(crate) progress: Option<Progress>,
}

impl PaneController {
    pub fn new(renderer: Box<dyn Renderer>, config: &PipelineConfig) -> Self {
        Self {
            renderer,
            lifecycle: PaneLifecycle::AwaitingSize,
            pipeline: OutputPipeline::new(),
            interceptors: PaneInterceptors::new(config.kitty_stack_limit),
            follow: FollowState::new(),
            throttle: ResizeThrottle::new(config.resize_throttle()),
            geometry: None,
            progress: None,
        }
    }

    pub fn lifecycle(&self) -> PaneLifecycle {
        self.lifecycle
    }

    pub fn follow_output(&self) -> bool {
        self.follow.follow_output()
    }

    pub fn geometry(&self) -> Option<Geometry> {
        self.geometry
    }

    /// Latest OSC 9;4 progress, `None` once hidden
    pub fn progress(&self) -> Option<Progress> {
        self.progress
    }

    /// Active Kitty keyboard flags
    pub fn kitty_flags(&self) -> u32 {
        self.interceptors.kitty().active_flags()
    }

    pub fn has_pending_output(&self) -> bool {
        self.pipeline.is_flush_scheduled()
    }
}

impl std::fmt::Debug for PaneController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaneController")
            .field("lifecycle", &self.lifecycle)
            .field("geometry", &self.geometry)
            .field("follow_output", &self.follow.follow_output())
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}
