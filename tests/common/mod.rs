//! Shared integration test helpers for cosmos-term.
//!
//! Provides a scriptable renderer and backend so the session controller can
//! be driven frame by frame without a real PTY or display.
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::Harness;
//! ```
//!
//! The `#![allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers are used per file.

#![allow(dead_code)]

use cosmos_term::config::Config;
use cosmos_term::error::RendererError;
use cosmos_term::pane::PaneId;
use cosmos_term::pty::{
    BackendEvent, ProcessBackend, ProcessHandle, PtyError, SpawnRequest, SpawnedProcess,
};
use cosmos_term::session::{SessionController, SessionId};
use cosmos_term::traits::{Geometry, Renderer, RendererEvent, RendererFactory, ScrollSource};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Observable state of one mock renderer.
#[derive(Debug)]
pub struct RendererState {
    pub writes: Vec<Vec<u8>>,
    /// First line of the bottom screen
    pub base_y: usize,
    /// First visible line
    pub viewport_y: usize,
    pub geometry: Geometry,
    /// What the element would fit; `None` while hidden
    pub proposed: Option<Geometry>,
    pub accelerated_fails: bool,
    pub software: bool,
    pub focus_count: usize,
    pub disposed: bool,
}

impl RendererState {
    pub fn written(&self) -> Vec<u8> {
        self.writes.concat()
    }

    pub fn at_bottom(&self) -> bool {
        self.viewport_y >= self.base_y
    }
}

pub type SharedRenderer = Rc<RefCell<RendererState>>;

/// Renderer that records writes and models a scrollback viewport.
///
/// Each write adds one line of scrollback per newline (at least one). The
/// viewport does not follow on its own; only `scroll_to_bottom` moves it
/// down. A resize reflows and leaves the viewport at the top, like a widget
/// that reports a transient position mid-resize.
pub struct MockRenderer {
    state: SharedRenderer,
}

impl Renderer for MockRenderer {
    fn write(&mut self, data: &[u8]) {
        let mut s = self.state.borrow_mut();
        let lines = data.iter().filter(|b| **b == b'\n').count().max(1);
        s.base_y += lines;
        s.writes.push(data.to_vec());
    }

    fn scroll_to_bottom(&mut self) {
        let mut s = self.state.borrow_mut();
        s.viewport_y = s.base_y;
    }

    fn viewport_y(&self) -> usize {
        self.state.borrow().viewport_y
    }

    fn base_y(&self) -> usize {
        self.state.borrow().base_y
    }

    fn rows(&self) -> u16 {
        self.state.borrow().geometry.rows
    }

    fn cols(&self) -> u16 {
        self.state.borrow().geometry.cols
    }

    fn resize(&mut self, rows: u16, cols: u16) {
        let mut s = self.state.borrow_mut();
        s.geometry = Geometry::new(rows, cols);
        s.viewport_y = 0;
    }

    fn propose_geometry(&self) -> Option<Geometry> {
        self.state.borrow().proposed
    }

    fn enable_accelerated(&mut self) -> Result<(), RendererError> {
        let mut s = self.state.borrow_mut();
        if s.accelerated_fails {
            return Err(RendererError::AcceleratedUnavailable("mock".to_string()));
        }
        s.software = false;
        Ok(())
    }

    fn use_software(&mut self) {
        self.state.borrow_mut().software = true;
    }

    fn focus(&mut self) {
        self.state.borrow_mut().focus_count += 1;
    }

    fn dispose(&mut self) {
        self.state.borrow_mut().disposed = true;
    }
}

/// Factory settings applied to every renderer it creates.
#[derive(Clone)]
pub struct MockFactory {
    pub renderers: Rc<RefCell<HashMap<PaneId, SharedRenderer>>>,
    pub proposed: Rc<RefCell<Option<Geometry>>>,
    pub accelerated_fails: Rc<RefCell<bool>>,
}

impl Default for MockFactory {
    fn default() -> Self {
        Self {
            renderers: Rc::new(RefCell::new(HashMap::new())),
            proposed: Rc::new(RefCell::new(Some(Geometry::new(24, 80)))),
            accelerated_fails: Rc::new(RefCell::new(false)),
        }
    }
}

impl RendererFactory for MockFactory {
    fn create(&mut self, pane: PaneId) -> Box<dyn Renderer> {
        let state = Rc::new(RefCell::new(RendererState {
            writes: Vec::new(),
            base_y: 0,
            viewport_y: 0,
            geometry: Geometry::new(0, 0),
            proposed: *self.proposed.borrow(),
            accelerated_fails: *self.accelerated_fails.borrow(),
            software: false,
            focus_count: 0,
            disposed: false,
        }));
        self.renderers.borrow_mut().insert(pane, Rc::clone(&state));
        Box::new(MockRenderer { state })
    }
}

/// Every call the controller made to the backend.
#[derive(Debug, Default)]
pub struct BackendLog {
    pub spawns: Vec<SpawnRequest>,
    pub writes: Vec<(ProcessHandle, Vec<u8>)>,
    pub resizes: Vec<(ProcessHandle, u16, u16)>,
    pub kills: Vec<ProcessHandle>,
    /// Handles whose process has exited; writes to them fail
    pub dead: Vec<ProcessHandle>,
    pub fail_resize: bool,
}

impl BackendLog {
    pub fn writes_to(&self, handle: ProcessHandle) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|(h, _)| *h == handle)
            .flat_map(|(_, d)| d.clone())
            .collect()
    }
}

/// Backend that records requests; spawn completions are delivered by the test.
#[derive(Clone, Default)]
pub struct MockBackend {
    pub log: Rc<RefCell<BackendLog>>,
}

impl ProcessBackend for MockBackend {
    fn spawn(&self, request: SpawnRequest) {
        self.log.borrow_mut().spawns.push(request);
    }

    fn write(&self, handle: ProcessHandle, data: &[u8]) -> Result<(), PtyError> {
        let mut log = self.log.borrow_mut();
        if log.dead.contains(&handle) || log.kills.contains(&handle) {
            return Err(PtyError::NotFound(handle));
        }
        log.writes.push((handle, data.to_vec()));
        Ok(())
    }

    fn resize(&self, handle: ProcessHandle, rows: u16, cols: u16) -> Result<(), PtyError> {
        let mut log = self.log.borrow_mut();
        log.resizes.push((handle, rows, cols));
        if log.fail_resize {
            return Err(PtyError::Resize("mock failure".to_string()));
        }
        Ok(())
    }

    fn kill(&self, handle: ProcessHandle) -> Result<(), PtyError> {
        self.log.borrow_mut().kills.push(handle);
        Ok(())
    }
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// A controller wired to mock collaborators, with a movable clock.
pub struct Harness {
    pub controller: SessionController<MockBackend, MockFactory>,
    pub backend: Rc<RefCell<BackendLog>>,
    pub factory: MockFactory,
    pub start: Instant,
    pub now: Instant,
    next_handle: u64,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::build(config, MockFactory::default())
    }

    pub fn build(config: Config, factory: MockFactory) -> Self {
        let backend = MockBackend::default();
        let log = Rc::clone(&backend.log);
        let controller =
            SessionController::new(backend, factory.clone(), config, "test", std::env::temp_dir());
        let start = Instant::now();
        Self {
            controller,
            backend: log,
            factory,
            start,
            now: start,
            next_handle: 100,
        }
    }

    pub fn advance(&mut self, by: Duration) -> Instant {
        self.now += by;
        self.now
    }

    pub fn renderer(&self, pane: PaneId) -> SharedRenderer {
        Rc::clone(
            self.factory
                .renderers
                .borrow()
                .get(&pane)
                .expect("pane has a renderer"),
        )
    }

    /// Create a session and return it with its first pane.
    pub fn session(&mut self, title: &str) -> (SessionId, PaneId) {
        let id = self.controller.create_session(title, self.now);
        let pane = self.controller.session(id).expect("session exists").active_pane_id;
        (id, pane)
    }

    /// Handle the backend will report for the next successful spawn.
    pub fn reserve_handle(&mut self) -> ProcessHandle {
        let handle = ProcessHandle::new(self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// Deliver a successful spawn completion naming `handle`.
    pub fn announce_spawn(&mut self, pane: PaneId, handle: ProcessHandle) {
        self.controller.handle_backend_event(
            BackendEvent::Spawned {
                pane,
                result: Ok(SpawnedProcess { handle, pid: 4242 }),
            },
            self.now,
        );
    }

    /// Complete the pending spawn for `pane` successfully.
    pub fn complete_spawn(&mut self, pane: PaneId) -> ProcessHandle {
        let handle = self.reserve_handle();
        self.announce_spawn(pane, handle);
        handle
    }

    pub fn exit(&mut self, handle: ProcessHandle, code: Option<u32>) {
        self.controller
            .handle_backend_event(BackendEvent::Exited { handle, code }, self.now);
    }

    /// Create a session whose first pane is already bound.
    pub fn bound_session(&mut self, title: &str) -> (SessionId, PaneId, ProcessHandle) {
        let (session, pane) = self.session(title);
        let handle = self.complete_spawn(pane);
        (session, pane, handle)
    }

    pub fn output(&mut self, handle: ProcessHandle, data: &[u8]) {
        self.controller.handle_backend_event(
            BackendEvent::Output {
                handle,
                data: data.to_vec(),
            },
            self.now,
        );
    }

    /// Advance one frame (16 ms) and flush.
    pub fn frame(&mut self) {
        self.advance(ms(16));
        self.controller.on_animation_frame(self.now);
    }

    pub fn user_scroll(&mut self, pane: PaneId, lines_up: usize) {
        {
            let state = self.renderer(pane);
            let mut s = state.borrow_mut();
            s.viewport_y = s.viewport_y.saturating_sub(lines_up);
        }
        self.controller.handle_renderer_event(
            pane,
            RendererEvent::Scroll {
                source: ScrollSource::User,
            },
            self.now,
        );
    }
}
