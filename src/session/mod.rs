//! Sessions, projects and the lifecycle controller that drives them.
//!
//! - [`Project`]: a working directory holding an ordered list of sessions
//! - [`Session`]: one tab; a pane tree plus its busy/idle engine
//! - [`SessionController`]: binds panes to backend processes and renderers,
//!   pumps output through the interceptors and feeds the activity engines

mod controller;
mod pane;
mod registry;
mod resize_throttle;

pub use controller::{ActivityUpdate, SessionController};
pub use pane::{PaneController, PaneLifecycle};
pub use registry::ProcessRegistry;
pub use resize_throttle::ResizeThrottle;

use crate::activity::ActivityEngine;
use crate::pane::{PaneId, PaneNode, find_leaf_ids};
use cosmos_term_config::ActivityConfig;
use std::path::PathBuf;
use uuid::Uuid;

/// Unique identifier for a session
pub type SessionId = Uuid;

/// One tab: a pane layout and the activity state derived from its panes.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub title: String,
    pub pane_tree: PaneNode,
    pub active_pane_id: PaneId,
    /// Locked sessions ignore title changes from the running program
    pub locked: bool,
    activity: ActivityEngine,
}

impl Session {
    pub fn new(title: impl Into<String>, pane_id: PaneId, activity: ActivityConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            pane_tree: PaneNode::leaf(pane_id),
            active_pane_id: pane_id,
            locked: false,
            activity: ActivityEngine::new(activity),
        }
    }

    /// Pulsing indicator
    pub fn has_activity(&self) -> bool {
        self.activity.has_activity()
    }

    /// Completion checkmark
    pub fn activity_completed(&self) -> bool {
        self.activity.activity_completed()
    }

    pub fn activity(&self) -> &ActivityEngine {
        &self.activity
    }

    pub(crate) fn activity_mut(&mut self) -> &mut ActivityEngine {
        &mut self.activity
    }

    pub fn pane_ids(&self) -> Vec<PaneId> {
        find_leaf_ids(&self.pane_tree)
    }
}

/// A working directory and the sessions opened in it.
#[derive(Debug, Clone)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    /// Working directory for every spawned shell
    pub path: PathBuf,
    pub sessions: Vec<Session>,
    pub active_session_id: Option<SessionId>,
}

impl Project {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            path: path.into(),
            sessions: Vec::new(),
            active_session_id: None,
        }
    }

    pub fn session(&self, id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn session_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    pub fn active_session(&self) -> Option<&Session> {
        self.active_session_id.and_then(|id| self.session(id))
    }
}
