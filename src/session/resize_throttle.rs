//! Leading-edge resize throttle with a single trailing call.

use crate::traits::Geometry;
use std::time::{Duration, Instant};

/// Limits resize requests to the backend while the user drags a divider.
///
/// A request fires immediately when the last one sent is at least `interval`
/// old. Otherwise it is held as the trailing request, replacing any earlier
/// held geometry, and released by [`ResizeThrottle::poll`] once the interval
/// has passed.
#[derive(Debug, Clone)]
pub struct ResizeThrottle {
    interval: Duration,
    last_sent: Option<Instant>,
    trailing: Option<Geometry>,
}

impl ResizeThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_sent: None,
            trailing: None,
        }
    }

    /// Returns the geometry to send now, if any.
    pub fn request(&mut self, geometry: Geometry, now: Instant) -> Option<Geometry> {
        if self.ready(now) {
            self.last_sent = Some(now);
            self.trailing = None;
            Some(geometry)
        } else {
            self.trailing = Some(geometry);
            None
        }
    }

    /// Release the trailing request once the interval has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<Geometry> {
        if self.trailing.is_some() && self.ready(now) {
            self.last_sent = Some(now);
            return self.trailing.take();
        }
        None
    }

    pub fn has_pending(&self) -> bool {
        self.trailing.is_some()
    }

    pub fn cancel(&mut self) {
        self.trailing = None;
    }

    fn ready(&self, now: Instant) -> bool {
        self.last_sent
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_leading_edge_then_single_trailing() {
        let t0 = Instant::now();
        let mut throttle = ResizeThrottle::new(100 * MS);
        let g = |c| Geometry::new(24, c);

        assert_eq!(throttle.request(g(80), t0), Some(g(80)));
        assert_eq!(throttle.request(g(81), t0 + 10 * MS), None);
        assert_eq!(throttle.request(g(82), t0 + 20 * MS), None);
        assert!(throttle.has_pending());

        assert_eq!(throttle.poll(t0 + 50 * MS), None);
        assert_eq!(throttle.poll(t0 + 100 * MS), Some(g(82)));
        assert_eq!(throttle.poll(t0 + 300 * MS), None);
    }

    #[test]
    fn test_spaced_requests_fire_immediately() {
        let t0 = Instant::now();
        let mut throttle = ResizeThrottle::new(100 * MS);
        assert!(throttle.request(Geometry::new(10, 10), t0).is_some());
        assert!(
            throttle
                .request(Geometry::new(11, 10), t0 + 150 * MS)
                .is_some()
        );
        assert!(!throttle.has_pending());
    }

    #[test]
    fn test_cancel_drops_trailing() {
        let t0 = Instant::now();
        let mut throttle = ResizeThrottle::new(100 * MS);
        throttle.request(Geometry::new(10, 10), t0);
        throttle.request(Geometry::new(12, 10), t0 + MS);
        throttle.cancel();
        assert_eq!(throttle.poll(t0 + 200 * MS), None);
    }
}
