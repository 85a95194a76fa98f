//! Contracts between the session core and the rendering widget.
//!
//! The core never draws. It drives a [`Renderer`] (one per pane) and receives
//! the widget's observer callbacks as [`RendererEvent`]s routed through
//! `SessionController::handle_renderer_event`. Tests substitute mock
//! renderers that record writes and simulate scroll positions.

use crate::error::RendererError;
use crate::input::KeyEvent;
use crate::pane::PaneId;

/// Terminal grid size in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub rows: u16,
    pub cols: u16,
}

impl Geometry {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }
}

/// Who moved the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollSource {
    /// Wheel, scrollbar or keyboard scrolling by the user
    User,
    /// The renderer moved the viewport itself (new output, resize reflow)
    Programmatic,
}

/// Observer callbacks from a pane's renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RendererEvent {
    /// Input bytes produced by the widget's own key/paste handling
    Data(Vec<u8>),
    /// A key press offered to the core before the widget encodes it
    Key(KeyEvent),
    /// The viewport moved
    Scroll { source: ScrollSource },
    /// The foreground program set a window title
    TitleChanged(String),
    Bell,
    /// The accelerated backend lost its context
    ContextLost,
    /// The widget's element size changed
    Resized,
}

/// Rendering widget for one pane.
///
/// Scroll positions are in lines: `base_y` is the first line of the bottom
/// screen, `viewport_y` the first visible line. The viewport is pinned to the
/// bottom when they are equal.
pub trait Renderer {
    /// Feed output bytes to the widget's parser.
    fn write(&mut self, data: &[u8]);

    fn scroll_to_bottom(&mut self);

    fn viewport_y(&self) -> usize;

    fn base_y(&self) -> usize;

    fn rows(&self) -> u16;

    fn cols(&self) -> u16;

    /// Resize the grid. May reflow and move the viewport.
    fn resize(&mut self, rows: u16, cols: u16);

    /// Grid size that fits the widget's element, `None` while the element is
    /// hidden or has zero size.
    fn propose_geometry(&self) -> Option<Geometry>;

    /// Switch to the hardware-accelerated backend.
    fn enable_accelerated(&mut self) -> Result<(), RendererError>;

    /// Switch to the software backend.
    fn use_software(&mut self);

    fn focus(&mut self);

    fn dispose(&mut self);

    /// Whether the viewport currently shows the bottom of the buffer
    fn is_at_bottom(&self) -> bool {
        self.viewport_y() >= self.base_y()
    }
}

/// Creates the renderer widget for a newly mounted pane.
pub trait RendererFactory {
    fn create(&mut self, pane: PaneId) -> Box<dyn Renderer>;
}
