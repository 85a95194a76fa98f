use crate::traits::{Renderer, ScrollSource};

/// Whether new output should keep the viewport pinned to the bottom.
///
/// Starts out following. A user scroll that leaves the viewport above the
/// bottom turns following off; only an explicit scroll-to-bottom or a fit
/// that lands on the bottom turns it back on. Programmatic scrolls (reflow
/// during resize, output) never change it.
#[derive(Debug, Clone)]
pub struct FollowState {
    follow_output: bool,
}

impl Default for FollowState {
    fn default() -> Self {
        Self::new()
    }
}

impl FollowState {
    pub fn new() -> Self {
        Self {
            follow_output: true,
        }
    }

    pub fn follow_output(&self) -> bool {
        self.follow_output
    }

    /// React to a viewport move reported by the renderer.
    pub fn on_scroll(&mut self, source: ScrollSource, renderer: &dyn Renderer) {
        if source == ScrollSource::User && !renderer.is_at_bottom() && self.follow_output {
            crate::debug_log!(
                "VIEWPORT",
                "user scrolled to {} (base {}); following off",
                renderer.viewport_y(),
                renderer.base_y()
            );
            self.follow_output = false;
        }
    }

    /// Explicit "scroll to bottom" action.
    pub fn scroll_to_bottom(&mut self, renderer: &mut dyn Renderer) {
        renderer.scroll_to_bottom();
        self.follow_output = true;
    }

    /// Run `resize` without letting its transient viewport jump count as a
    /// user scroll, then restore the pin if the pane was following.
    pub fn resize_preserving(&mut self, renderer: &mut dyn Renderer, rows: u16, cols: u16) {
        let was_following = self.follow_output;
        renderer.resize(rows, cols);
        if was_following {
            renderer.scroll_to_bottom();
        }
        if renderer.is_at_bottom() {
            self.follow_output = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RendererError;
    use crate::traits::Geometry;

    /// Minimal renderer with a movable viewport.
    struct Viewport {
        viewport_y: usize,
        base_y: usize,
    }

    impl Renderer for Viewport {
        fn write(&mut self, _data: &[u8]) {}
        fn scroll_to_bottom(&mut self) {
            self.viewport_y = self.base_y;
        }
        fn viewport_y(&self) -> usize {
            self.viewport_y
        }
        fn base_y(&self) -> usize {
            self.base_y
        }
        fn rows(&self) -> u16 {
            24
        }
        fn cols(&self) -> u16 {
            80
        }
        fn resize(&mut self, _rows: u16, _cols: u16) {
            // Reflow leaves the viewport somewhere in the middle.
            self.base_y += 5;
        }
        fn propose_geometry(&self) -> Option<Geometry> {
            None
        }
        fn enable_accelerated(&mut self) -> Result<(), RendererError> {
            Ok(())
        }
        fn use_software(&mut self) {}
        fn focus(&mut self) {}
        fn dispose(&mut self) {}
    }

    #[test]
    fn test_user_scroll_up_stops_following() {
        let mut follow = FollowState::new();
        let vp = Viewport {
            viewport_y: 10,
            base_y: 40,
        };
        follow.on_scroll(ScrollSource::User, &vp);
        assert!(!follow.follow_output());
    }

    #[test]
    fn test_programmatic_scroll_ignored() {
        let mut follow = FollowState::new();
        let vp = Viewport {
            viewport_y: 10,
            base_y: 40,
        };
        follow.on_scroll(ScrollSource::Programmatic, &vp);
        assert!(follow.follow_output());
    }

    #[test]
    fn test_user_scroll_back_down_does_not_resume() {
        let mut follow = FollowState::new();
        let mut vp = Viewport {
            viewport_y: 10,
            base_y: 40,
        };
        follow.on_scroll(ScrollSource::User, &vp);
        vp.viewport_y = 40;
        follow.on_scroll(ScrollSource::User, &vp);
        assert!(!follow.follow_output());

        follow.scroll_to_bottom(&mut vp);
        assert!(follow.follow_output());
    }

    #[test]
    fn test_resize_keeps_pin_when_following() {
        let mut follow = FollowState::new();
        let mut vp = Viewport {
            viewport_y: 40,
            base_y: 40,
        };
        follow.resize_preserving(&mut vp, 30, 100);
        assert_eq!(vp.viewport_y, vp.base_y);
        assert!(follow.follow_output());
    }

    #[test]
    fn test_resize_leaves_scrolled_view_alone() {
        let mut follow = FollowState::new();
        let mut vp = Viewport {
            viewport_y: 10,
            base_y: 40,
        };
        follow.on_scroll(ScrollSource::User, &vp);
        follow.resize_preserving(&mut vp, 30, 100);
        assert_eq!(vp.viewport_y, 10);
        assert!(!follow.follow_output());
    }
}
