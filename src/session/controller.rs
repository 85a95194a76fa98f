//! Session lifecycle controller.
//!
//! Owns every mounted pane of one project: its renderer, its output
//! pipeline, its interceptor state and its binding to a backend process.
//! All methods run on the caller's thread. Asynchronous input arrives
//! through [`SessionController::handle_backend_event`] (or [`pump`]) and the
//! frame and timer callbacks [`on_animation_frame`] and [`tick`].
//!
//! [`pump`]: SessionController::pump
//! [`on_animation_frame`]: SessionController::on_animation_frame
//! [`tick`]: SessionController::tick

use super::pane::{PaneController, PaneLifecycle};
use super::registry::ProcessRegistry;
use super::{Project, Session, SessionId};
use crate::activity::{ActivitySignal, ActivityTransition};
use crate::input::encode_kitty_key;
use crate::intercept::{InterceptEvent, ProgressState};
use crate::pane::{PaneId, PaneNode, SplitDirection, tree_ops};
use crate::traits::{Geometry, RendererEvent, RendererFactory};
use cosmos_term_config::Config;
use cosmos_term_pty::{
    BackendEvent, BackendEventReceiver, ProcessBackend, ProcessHandle, SpawnRequest,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

/// An activity state change for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityUpdate {
    pub session: SessionId,
    pub transition: ActivityTransition,
}

/// Drives the panes of one [`Project`].
pub struct SessionController<B: ProcessBackend, F: RendererFactory> {
    backend: B,
    factory: F,
    config: Config,
    project: Project,
    panes: HashMap<PaneId, PaneController>,
    pane_session: HashMap<PaneId, SessionId>,
    registry: ProcessRegistry,
    /// Events for handles whose `Spawned` event has not been handled yet
    early_events: HashMap<ProcessHandle, Vec<BackendEvent>>,
    next_pane_id: PaneId,
    updates: Vec<ActivityUpdate>,
    disposed: bool,
}

impl<B: ProcessBackend, F: RendererFactory> SessionController<B, F> {
    pub fn new(
        backend: B,
        factory: F,
        config: Config,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            backend,
            factory,
            config,
            project: Project::new(name, path),
            panes: HashMap::new(),
            pane_session: HashMap::new(),
            registry: ProcessRegistry::new(),
            early_events: HashMap::new(),
            next_pane_id: 1,
            updates: Vec::new(),
            disposed: false,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn session(&self, id: SessionId) -> Option<&Session> {
        self.project.session(id)
    }

    /// Lock or unlock a session's title against program title changes.
    pub fn set_session_locked(&mut self, id: SessionId, locked: bool) {
        if let Some(session) = self.project.session_mut(id) {
            session.locked = locked;
        }
    }

    pub fn pane(&self, pane: PaneId) -> Option<&PaneController> {
        self.panes.get(&pane)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn process_handle(&self, pane: PaneId) -> Option<ProcessHandle> {
        self.registry.handle_for(pane)
    }

    pub fn session_of(&self, pane: PaneId) -> Option<SessionId> {
        self.pane_session.get(&pane).copied()
    }

    /// Ordered pane ids of a session, depth-first
    pub fn find_leaf_ids(&self, session: SessionId) -> Vec<PaneId> {
        self.project
            .session(session)
            .map(Session::pane_ids)
            .unwrap_or_default()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Activity transitions produced since the last call
    pub fn take_activity_updates(&mut self) -> Vec<ActivityUpdate> {
        std::mem::take(&mut self.updates)
    }

    // ========================================================================
    // Session and pane structure
    // ========================================================================

    /// Create a session with a single pane and mount it.
    ///
    /// The first session of the project becomes the visible one.
    pub fn create_session(&mut self, title: impl Into<String>, now: Instant) -> SessionId {
        let pane_id = self.allocate_pane_id();
        let session = Session::new(title, pane_id, self.config.activity.clone());
        let id = session.id;
        self.project.sessions.push(session);
        crate::debug_info!("SESSION", "created session {} with pane {}", id, pane_id);

        if self.project.active_session_id.is_none() {
            self.set_active_session(id, now);
        }
        self.mount_pane(id, pane_id, now);
        id
    }

    /// Split `target` and mount a new pane next to it. Returns the new pane.
    pub fn split_pane(
        &mut self,
        session: SessionId,
        target: PaneId,
        direction: SplitDirection,
        before: bool,
        now: Instant,
    ) -> Option<PaneId> {
        if self.disposed {
            return None;
        }
        let s = self.project.session(session)?;
        if !tree_ops::contains(&s.pane_tree, target) {
            crate::debug_log!("PANE", "split target {} not in session {}", target, session);
            return None;
        }
        let new_id = self.allocate_pane_id();

        if let Some(s) = self.project.session_mut(session) {
            s.pane_tree = tree_ops::split(&s.pane_tree, target, new_id, direction, before);
            s.active_pane_id = new_id;
        }
        crate::debug_info!(
            "PANE",
            "split pane {} {:?} -> new pane {}",
            target,
            direction,
            new_id
        );
        self.mount_pane(session, new_id, now);
        Some(new_id)
    }

    /// Close a pane and remove it from its session's tree.
    ///
    /// A session never holds an empty tree: closing its last pane mounts a
    /// fresh one. When the active pane is closed, the last remaining pane
    /// becomes active.
    pub fn remove_pane(&mut self, session: SessionId, pane: PaneId, now: Instant) -> bool {
        let Some(s) = self.project.session(session) else {
            return false;
        };
        if !tree_ops::contains(&s.pane_tree, pane) {
            return false;
        }
        self.dispose_pane(pane);

        let mut replacement = None;
        let remaining = self
            .project
            .session(session)
            .and_then(|s| tree_ops::remove(&s.pane_tree, pane));
        let tree = match remaining {
            Some(tree) => tree,
            None => {
                let new_id = self.allocate_pane_id();
                replacement = Some(new_id);
                PaneNode::leaf(new_id)
            }
        };

        if let Some(s) = self.project.session_mut(session) {
            s.pane_tree = tree;
            if (s.active_pane_id == pane || replacement.is_some())
                && let Some(last) = s.pane_tree.last_pane_id()
            {
                s.active_pane_id = last;
            }
            if let Some(transition) = s.activity_mut().remove_pane(pane) {
                self.updates.push(ActivityUpdate {
                    session,
                    transition,
                });
            }
        }

        if let Some(new_id) = replacement {
            crate::debug_info!("PANE", "session {} emptied; mounting pane {}", session, new_id);
            self.mount_pane(session, new_id, now);
        }
        true
    }

    /// Move the divider next to `pane` by `delta` of its branch.
    pub fn resize_pane(&mut self, session: SessionId, pane: PaneId, delta: f64) {
        if let Some(s) = self.project.session_mut(session) {
            s.pane_tree = tree_ops::resize(&s.pane_tree, pane, delta);
        }
    }

    pub fn focus_pane(&mut self, session: SessionId, pane: PaneId) {
        let Some(s) = self.project.session_mut(session) else {
            return;
        };
        if !tree_ops::contains(&s.pane_tree, pane) {
            return;
        }
        s.active_pane_id = pane;
        if let Some(p) = self.panes.get_mut(&pane) {
            p.renderer.focus();
        }
    }

    /// Make `id` the session on screen.
    ///
    /// The previously visible session stops being visible; the new one opens
    /// its switch grace period and refits its panes.
    pub fn set_active_session(&mut self, id: SessionId, now: Instant) {
        if self.project.session(id).is_none() {
            return;
        }
        self.project.active_session_id = Some(id);
        for s in &mut self.project.sessions {
            let visible = s.id == id;
            s.activity_mut().set_visible(visible, now);
        }
        for pane in self.find_leaf_ids(id) {
            self.fit_pane(pane, now);
        }
    }

    /// Close a session and every pane in it.
    pub fn remove_session(&mut self, id: SessionId, now: Instant) -> bool {
        let Some(index) = self.project.sessions.iter().position(|s| s.id == id) else {
            return false;
        };
        for pane in self.project.sessions[index].pane_ids() {
            self.dispose_pane(pane);
        }
        self.project.sessions.remove(index);
        crate::debug_info!("SESSION", "removed session {}", id);

        if self.project.active_session_id == Some(id) {
            self.project.active_session_id = None;
            if let Some(next) = self.project.sessions.last().map(|s| s.id) {
                self.set_active_session(next, now);
            }
        }
        true
    }

    // ========================================================================
    // Mount and dispose
    // ========================================================================

    fn allocate_pane_id(&mut self) -> PaneId {
        let id = self.next_pane_id;
        self.next_pane_id += 1;
        id
    }

    fn mount_pane(&mut self, session: SessionId, pane: PaneId, now: Instant) {
        let mut renderer = self.factory.create(pane);
        if self.config.pipeline.accelerated_renderer {
            if let Err(e) = renderer.enable_accelerated() {
                log::warn!("pane {}: {}; using software renderer", pane, e);
                renderer.use_software();
            }
        } else {
            renderer.use_software();
        }

        self.panes
            .insert(pane, PaneController::new(renderer, &self.config.pipeline));
        self.pane_session.insert(pane, session);
        crate::debug_log!("PANE", "mounted pane {} in session {}", pane, session);
        self.fit_pane(pane, now);
    }

    /// Tear down one pane. Safe to call for panes that were never mounted.
    fn dispose_pane(&mut self, pane: PaneId) {
        self.pane_session.remove(&pane);
        let Some(mut controller) = self.panes.remove(&pane) else {
            return;
        };
        controller.pipeline.clear();
        controller.throttle.cancel();
        controller.interceptors.reset();

        if let Some(handle) = self.registry.unbind_pane(pane) {
            if let Err(e) = self.backend.kill(handle) {
                crate::debug_error!("PANE", "kill {} for pane {} failed: {}", handle, pane, e);
            }
        }
        controller.renderer.dispose();
        crate::debug_log!("PANE", "disposed pane {} ({:?})", pane, controller.lifecycle);
    }

    /// Dispose every pane. Late backend events become no-ops, and processes
    /// that finish spawning afterwards are killed.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        let panes: Vec<PaneId> = self.panes.keys().copied().collect();
        for pane in panes {
            self.dispose_pane(pane);
        }
        self.early_events.clear();
        self.disposed = true;
        crate::debug_info!("SESSION", "controller disposed");
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// Fit `pane` to its renderer's element.
    ///
    /// The first visible size starts the spawn; later sizes go to the bound
    /// process through the resize throttle.
    pub fn fit_pane(&mut self, pane_id: PaneId, now: Instant) {
        if self.disposed {
            return;
        }
        let Some(pane) = self.panes.get_mut(&pane_id) else {
            return;
        };
        let Some(geometry) = pane.renderer.propose_geometry() else {
            crate::debug_trace!("PANE", "pane {} has no visible size yet", pane_id);
            return;
        };

        let changed = pane.geometry != Some(geometry);
        if changed {
            pane.follow
                .resize_preserving(pane.renderer.as_mut(), geometry.rows, geometry.cols);
            pane.geometry = Some(geometry);
        }

        match pane.lifecycle {
            PaneLifecycle::AwaitingSize => {
                pane.lifecycle = PaneLifecycle::Spawning { geometry };
                let request = SpawnRequest {
                    pane: pane_id,
                    cwd: self.project.path.clone(),
                    shell: self.config.shell.shell.clone(),
                    args: self.config.shell.parsed_args(),
                    login_shell: self.config.shell.login_shell,
                    rows: geometry.rows,
                    cols: geometry.cols,
                };
                crate::debug_info!(
                    "PANE",
                    "spawning pane {} at {}x{}",
                    pane_id,
                    geometry.cols,
                    geometry.rows
                );
                self.backend.spawn(request);
            }
            PaneLifecycle::Bound(handle) if changed => {
                if let Some(g) = pane.throttle.request(geometry, now) {
                    send_resize(&self.backend, handle, g);
                }
            }
            _ => {}
        }
    }

    // ========================================================================
    // Backend events
    // ========================================================================

    /// Drain every queued backend event. Returns how many were handled.
    pub fn pump(&mut self, events: &mut BackendEventReceiver, now: Instant) -> usize {
        let mut handled = 0;
        while let Ok(event) = events.try_recv() {
            self.handle_backend_event(event, now);
            handled += 1;
        }
        handled
    }

    pub fn handle_backend_event(&mut self, event: BackendEvent, now: Instant) {
        let handle = match &event {
            BackendEvent::Spawned { .. } => None,
            BackendEvent::Output { handle, .. } | BackendEvent::Exited { handle, .. } => {
                Some(*handle)
            }
        };
        if let Some(handle) = handle
            && self.registry.pane_for(handle).is_none()
        {
            self.hold_unbound(handle, event);
            return;
        }

        match event {
            BackendEvent::Spawned { pane, result } => self.on_spawned(pane, result, now),
            BackendEvent::Output { handle, data } => {
                if let Some(pane) = self.registry.pane_for(handle)
                    && let Some(p) = self.panes.get_mut(&pane)
                {
                    p.pipeline.push(data);
                }
            }
            BackendEvent::Exited { handle, code } => self.on_exited(handle, code),
        }
    }

    /// Keep an event for a handle the controller has not bound yet.
    ///
    /// A backend may deliver a process's first output, or even its exit,
    /// before the spawn completion that names the handle. Such events are
    /// held while a spawn is in flight and replayed once it binds.
    fn hold_unbound(&mut self, handle: ProcessHandle, event: BackendEvent) {
        let spawning = !self.disposed
            && self
                .panes
                .values()
                .any(|p| matches!(p.lifecycle, PaneLifecycle::Spawning { .. }));
        if spawning {
            crate::debug_trace!("PANE", "holding event for not yet bound {}", handle);
            self.early_events.entry(handle).or_default().push(event);
        } else {
            crate::debug_trace!("PANE", "dropping event from unbound {}", handle);
        }
    }

    fn on_spawned(
        &mut self,
        pane_id: PaneId,
        result: Result<cosmos_term_pty::SpawnedProcess, cosmos_term_pty::PtyError>,
        now: Instant,
    ) {
        let pane = if self.disposed {
            None
        } else {
            self.panes
                .get_mut(&pane_id)
                .filter(|p| matches!(p.lifecycle, PaneLifecycle::Spawning { .. }))
        };

        let Some(pane) = pane else {
            // The pane went away while the spawn was in flight.
            if let Ok(spawned) = result {
                self.early_events.remove(&spawned.handle);
                crate::debug_info!(
                    "PANE",
                    "pane {} gone before spawn completed; killing orphan {}",
                    pane_id,
                    spawned.handle
                );
                if let Err(e) = self.backend.kill(spawned.handle) {
                    crate::debug_error!("PANE", "kill orphan {} failed: {}", spawned.handle, e);
                }
            }
            return;
        };

        match result {
            Err(e) => {
                crate::debug_error!("PANE", "spawn for pane {} failed: {}", pane_id, e);
                log::error!("failed to start shell for pane {}: {}", pane_id, e);
                pane.lifecycle = PaneLifecycle::Inert;
            }
            Ok(spawned) => {
                let PaneLifecycle::Spawning { geometry: requested } = pane.lifecycle else {
                    return;
                };
                pane.lifecycle = PaneLifecycle::Bound(spawned.handle);
                self.registry.bind(pane_id, spawned.handle);
                crate::debug_info!(
                    "PANE",
                    "pane {} bound to {} (pid {})",
                    pane_id,
                    spawned.handle,
                    spawned.pid
                );

                // The element may have been resized while the spawn was in flight.
                if let Some(current) = pane.geometry
                    && current != requested
                    && let Some(g) = pane.throttle.request(current, now)
                {
                    send_resize(&self.backend, spawned.handle, g);
                }

                if let Some(held) = self.early_events.remove(&spawned.handle) {
                    crate::debug_log!(
                        "PANE",
                        "replaying {} early events for {}",
                        held.len(),
                        spawned.handle
                    );
                    for event in held {
                        self.handle_backend_event(event, now);
                    }
                }
            }
        }
        if !self
            .panes
            .values()
            .any(|p| matches!(p.lifecycle, PaneLifecycle::Spawning { .. }))
        {
            self.early_events.clear();
        }
    }

    fn on_exited(&mut self, handle: ProcessHandle, code: Option<u32>) {
        let Some(pane_id) = self.registry.unbind_handle(handle) else {
            crate::debug_trace!("PANE", "exit for unbound {}", handle);
            return;
        };
        crate::debug_info!("PANE", "pane {} process {} exited with {:?}", pane_id, handle, code);
        // Release the PTY; the child itself is already gone.
        if let Err(e) = self.backend.kill(handle) {
            crate::debug_trace!("PANE", "release of exited {}: {}", handle, e);
        }

        if let Some(pane) = self.panes.get_mut(&pane_id) {
            pane.lifecycle = PaneLifecycle::Exited(code);
            pane.throttle.cancel();
            pane.interceptors.reset();
            pane.progress = None;
        }
        if let Some(session) = self.pane_session.get(&pane_id).copied()
            && let Some(s) = self.project.session_mut(session)
            && let Some(transition) = s.activity_mut().remove_pane(pane_id)
        {
            self.updates.push(ActivityUpdate {
                session,
                transition,
            });
        }
    }

    // ========================================================================
    // Frame and timer callbacks
    // ========================================================================

    /// Flush each pane's batched output.
    ///
    /// Interceptor events go to the owning session's activity engine, Kitty
    /// query replies go back to the pane's process, and the batch size feeds
    /// the byte-volume heuristic.
    pub fn on_animation_frame(&mut self, now: Instant) {
        if self.disposed {
            return;
        }
        let mut pane_ids: Vec<PaneId> = self
            .panes
            .iter()
            .filter(|(_, p)| p.pipeline.is_flush_scheduled())
            .map(|(id, _)| *id)
            .collect();
        pane_ids.sort_unstable();

        for pane_id in pane_ids {
            let Some(pane) = self.panes.get_mut(&pane_id) else {
                continue;
            };
            let Some(outcome) =
                pane.pipeline
                    .flush(&mut pane.interceptors, pane.renderer.as_mut(), &pane.follow)
            else {
                continue;
            };
            let handle = pane.lifecycle.handle();
            let session_id = self.pane_session.get(&pane_id).copied();
            let mut session = session_id.and_then(|id| self.project.session_mut(id));

            for event in outcome.events {
                let transition = match event {
                    InterceptEvent::KittyReply(reply) => {
                        if let Some(handle) = handle
                            && let Err(e) = self.backend.write(handle, &reply)
                        {
                            crate::debug_log!("KITTY", "query reply to {} dropped: {}", handle, e);
                        }
                        None
                    }
                    InterceptEvent::Progress(progress) => {
                        pane.progress = (progress.state != ProgressState::Hidden).then_some(progress);
                        None
                    }
                    InterceptEvent::OscSupported => session.as_mut().and_then(|s| {
                        s.activity_mut().apply(ActivitySignal::OscSupported, now)
                    }),
                    InterceptEvent::Busy => session
                        .as_mut()
                        .and_then(|s| s.activity_mut().mark_pane_osc_busy(pane_id, now)),
                    InterceptEvent::Idle => session
                        .as_mut()
                        .and_then(|s| s.activity_mut().mark_pane_osc_idle(pane_id, now)),
                };
                if let (Some(transition), Some(session)) = (transition, session_id) {
                    self.updates.push(ActivityUpdate {
                        session,
                        transition,
                    });
                }
            }

            if let (Some(s), Some(id)) = (session, session_id)
                && let Some(transition) = s.activity_mut().mark_session_activity(outcome.received, now)
            {
                self.updates.push(ActivityUpdate {
                    session: id,
                    transition,
                });
            }
        }
    }

    /// Timer callback: release trailing resizes and end quiet heuristic
    /// bursts.
    pub fn tick(&mut self, now: Instant) {
        if self.disposed {
            return;
        }
        for pane in self.panes.values_mut() {
            if let Some(handle) = pane.lifecycle.handle()
                && let Some(g) = pane.throttle.poll(now)
            {
                send_resize(&self.backend, handle, g);
            }
        }
        for s in &mut self.project.sessions {
            if let Some(transition) = s.activity_mut().tick(now) {
                self.updates.push(ActivityUpdate {
                    session: s.id,
                    transition,
                });
            }
        }
    }

    // ========================================================================
    // Renderer events and input
    // ========================================================================

    /// Route an observer callback from `pane`'s renderer.
    ///
    /// Returns `true` when a key event was consumed by the Kitty encoder and
    /// the renderer must not send its legacy encoding.
    pub fn handle_renderer_event(
        &mut self,
        pane_id: PaneId,
        event: RendererEvent,
        now: Instant,
    ) -> bool {
        if self.disposed || !self.panes.contains_key(&pane_id) {
            return false;
        }
        match event {
            RendererEvent::Data(data) => {
                self.write_to_pane(pane_id, &data);
                false
            }
            RendererEvent::Key(key) => {
                let encoded = self
                    .panes
                    .get(&pane_id)
                    .and_then(|p| encode_kitty_key(&key, p.interceptors.kitty()));
                match encoded {
                    Some(bytes) => {
                        self.write_to_pane(pane_id, &bytes);
                        true
                    }
                    None => false,
                }
            }
            RendererEvent::Scroll { source } => {
                if let Some(p) = self.panes.get_mut(&pane_id) {
                    p.follow.on_scroll(source, p.renderer.as_ref());
                }
                false
            }
            RendererEvent::TitleChanged(title) => {
                if let Some(session) = self.pane_session.get(&pane_id).copied()
                    && let Some(s) = self.project.session_mut(session)
                    && s.active_pane_id == pane_id
                    && !s.locked
                {
                    crate::debug_log!("SESSION", "session {} title -> {:?}", session, title);
                    s.title = title;
                }
                false
            }
            RendererEvent::Bell => {
                crate::debug_info!("PANE", "bell in pane {}", pane_id);
                false
            }
            RendererEvent::ContextLost => {
                if let Some(p) = self.panes.get_mut(&pane_id) {
                    log::warn!("pane {}: accelerated renderer lost its context", pane_id);
                    p.renderer.use_software();
                }
                false
            }
            RendererEvent::Resized => {
                self.fit_pane(pane_id, now);
                false
            }
        }
    }

    /// Send input to the pane's process. Dropped when nothing is bound.
    pub fn write_to_pane(&mut self, pane_id: PaneId, data: &[u8]) {
        let Some(handle) = self.registry.handle_for(pane_id) else {
            crate::debug_log!(
                "PANE",
                "dropping {} input bytes for unbound pane {}",
                data.len(),
                pane_id
            );
            return;
        };
        if let Err(e) = self.backend.write(handle, data) {
            crate::debug_log!("PANE", "write to {} failed: {}", handle, e);
        }
    }

    /// Explicit scroll-to-bottom: pins the viewport and resumes following.
    pub fn scroll_to_bottom(&mut self, pane_id: PaneId) {
        if let Some(p) = self.panes.get_mut(&pane_id) {
            p.follow.scroll_to_bottom(p.renderer.as_mut());
        }
    }

    // ========================================================================
    // Activity entry points
    // ========================================================================

    pub fn mark_session_activity(&mut self, session: SessionId, bytes: usize, now: Instant) {
        if let Some(s) = self.project.session_mut(session)
            && let Some(transition) = s.activity_mut().mark_session_activity(bytes, now)
        {
            self.updates.push(ActivityUpdate {
                session,
                transition,
            });
        }
    }

    pub fn mark_pane_osc_busy(&mut self, pane: PaneId, now: Instant) {
        self.apply_pane_signal(pane, now, true);
    }

    pub fn mark_pane_osc_idle(&mut self, pane: PaneId, now: Instant) {
        self.apply_pane_signal(pane, now, false);
    }

    fn apply_pane_signal(&mut self, pane: PaneId, now: Instant, busy: bool) {
        let Some(session) = self.pane_session.get(&pane).copied() else {
            return;
        };
        let Some(s) = self.project.session_mut(session) else {
            return;
        };
        let transition = if busy {
            s.activity_mut().mark_pane_osc_busy(pane, now)
        } else {
            s.activity_mut().mark_pane_osc_idle(pane, now)
        };
        if let Some(transition) = transition {
            self.updates.push(ActivityUpdate {
                session,
                transition,
            });
        }
    }
}

/// Resize IPC failures are logged; the caller has already applied the
/// geometry locally.
fn send_resize<B: ProcessBackend>(backend: &B, handle: ProcessHandle, geometry: Geometry) {
    crate::debug_trace!("PANE", "resize {} to {}x{}", handle, geometry.cols, geometry.rows);
    if let Err(e) = backend.resize(handle, geometry.rows, geometry.cols) {
        crate::debug_error!("PANE", "resize {} failed: {}", handle, e);
        log::error!("resize of {} failed: {}", handle, e);
    }
}

impl<B: ProcessBackend, F: RendererFactory> Drop for SessionController<B, F> {
    fn drop(&mut self) {
        self.dispose();
    }
}
