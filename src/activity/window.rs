//! Rolling byte counter for the volume heuristic.

use std::time::{Duration, Instant};

/// Bytes seen in the current window and whether it already fired.
#[derive(Debug, Clone, Default)]
pub struct ActivityWindow {
    bytes: usize,
    window_start: Option<Instant>,
    fired_this_window: bool,
}

impl ActivityWindow {
    /// Count `bytes` of output at `now`.
    ///
    /// Returns `true` the first time the window's total exceeds `threshold`;
    /// later crossings inside the same window return `false`. A window older
    /// than `length` is restarted before counting.
    pub fn record(&mut self, bytes: usize, now: Instant, length: Duration, threshold: usize) -> bool {
        let expired = self
            .window_start
            .is_none_or(|start| now.saturating_duration_since(start) > length);
        if expired {
            self.bytes = 0;
            self.window_start = Some(now);
            self.fired_this_window = false;
        }

        self.bytes = self.bytes.saturating_add(bytes);
        if self.bytes > threshold && !self.fired_this_window {
            self.fired_this_window = true;
            return true;
        }
        false
    }

    pub fn bytes(&self) -> usize {
        self.bytes
    }

    pub fn fired_this_window(&self) -> bool {
        self.fired_this_window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(1000);

    #[test]
    fn test_fires_once_per_window() {
        let mut window = ActivityWindow::default();
        let t0 = Instant::now();
        assert!(!window.record(500, t0, WINDOW, 512));
        assert!(window.record(100, t0 + Duration::from_millis(10), WINDOW, 512));
        for i in 0..50 {
            assert!(!window.record(4096, t0 + Duration::from_millis(20 + i), WINDOW, 512));
        }
        assert!(window.fired_this_window());
    }

    #[test]
    fn test_resets_after_interval() {
        let mut window = ActivityWindow::default();
        let t0 = Instant::now();
        assert!(window.record(1000, t0, WINDOW, 512));
        assert!(!window.record(1000, t0 + WINDOW, WINDOW, 512));
        assert!(window.record(1000, t0 + Duration::from_millis(1001), WINDOW, 512));
        assert_eq!(window.bytes(), 1000);
    }

    #[test]
    fn test_exact_threshold_does_not_fire() {
        let mut window = ActivityWindow::default();
        assert!(!window.record(512, Instant::now(), WINDOW, 512));
    }
}
