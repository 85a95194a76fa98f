//! Per-session busy/idle state machine.
//!
//! Two sources feed it: semantic signals from shell integration (OSC 133 and
//! OSC 9;4, per pane) and a byte-volume heuristic for shells without them.
//! Once any pane has shown shell integration the heuristic is ignored for the
//! rest of the session.

use super::window::ActivityWindow;
use crate::pane::PaneId;
use cosmos_term_config::ActivityConfig;
use std::collections::HashSet;
use std::time::Instant;

/// Session activity state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityState {
    #[default]
    Idle,
    /// `confirmed` is set when shell integration reported the busy state;
    /// otherwise the byte-volume heuristic inferred it.
    Active { confirmed: bool },
}

impl ActivityState {
    pub fn is_active(self) -> bool {
        matches!(self, ActivityState::Active { .. })
    }
}

/// Input to [`ActivityEngine::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivitySignal {
    /// `bytes` of output were written to the session's renderer
    Output { bytes: usize },
    /// A pane emitted shell-integration sequences
    OscSupported,
    /// A pane reported a running command
    PaneBusy(PaneId),
    /// A pane reported its command finished
    PaneIdle(PaneId),
}

/// State change reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityTransition {
    /// Idle became active
    Started { confirmed: bool },
    /// A heuristic burst was confirmed by shell integration
    Confirmed,
    /// Active became idle
    Ended,
}

/// Busy/idle engine for one session.
#[derive(Debug, Clone)]
pub struct ActivityEngine {
    config: ActivityConfig,
    state: ActivityState,
    /// Latched on the first shell-integration sequence; never reset
    has_osc_support: bool,
    busy_panes: HashSet<PaneId>,
    window: ActivityWindow,
    /// When the current heuristic burst began
    burst_started: Option<Instant>,
    /// Last output that counted toward the heuristic
    last_output: Option<Instant>,
    visible: bool,
    visible_since: Option<Instant>,
    has_activity: bool,
    activity_completed: bool,
}

impl ActivityEngine {
    pub fn new(config: ActivityConfig) -> Self {
        Self {
            config,
            state: ActivityState::Idle,
            has_osc_support: false,
            busy_panes: HashSet::new(),
            window: ActivityWindow::default(),
            burst_started: None,
            last_output: None,
            visible: false,
            visible_since: None,
            has_activity: false,
            activity_completed: false,
        }
    }

    pub fn state(&self) -> ActivityState {
        self.state
    }

    /// Pulsing indicator: the session is busy
    pub fn has_activity(&self) -> bool {
        self.has_activity
    }

    /// Checkmark: the session finished work while the user was elsewhere
    pub fn activity_completed(&self) -> bool {
        self.activity_completed
    }

    pub fn has_osc_support(&self) -> bool {
        self.has_osc_support
    }

    pub fn is_pane_busy(&self, pane: PaneId) -> bool {
        self.busy_panes.contains(&pane)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Feed one signal through the state machine.
    pub fn apply(&mut self, signal: ActivitySignal, now: Instant) -> Option<ActivityTransition> {
        match signal {
            ActivitySignal::Output { bytes } => self.on_output(bytes, now),
            ActivitySignal::OscSupported => {
                self.latch_osc_support();
                None
            }
            ActivitySignal::PaneBusy(pane) => {
                self.latch_osc_support();
                self.busy_panes.insert(pane);
                match self.state {
                    ActivityState::Active { confirmed: true } => None,
                    ActivityState::Active { confirmed: false } => {
                        self.state = ActivityState::Active { confirmed: true };
                        crate::debug_info!("ACTIVITY", "burst confirmed by pane {}", pane);
                        Some(ActivityTransition::Confirmed)
                    }
                    ActivityState::Idle => Some(self.start(true, now)),
                }
            }
            ActivitySignal::PaneIdle(pane) => {
                self.latch_osc_support();
                self.busy_panes.remove(&pane);
                self.end_if_all_idle()
            }
        }
    }

    /// Count output bytes for the heuristic.
    pub fn mark_session_activity(&mut self, bytes: usize, now: Instant) -> Option<ActivityTransition> {
        self.apply(ActivitySignal::Output { bytes }, now)
    }

    pub fn mark_pane_osc_busy(&mut self, pane: PaneId, now: Instant) -> Option<ActivityTransition> {
        self.apply(ActivitySignal::PaneBusy(pane), now)
    }

    pub fn mark_pane_osc_idle(&mut self, pane: PaneId, now: Instant) -> Option<ActivityTransition> {
        self.apply(ActivitySignal::PaneIdle(pane), now)
    }

    /// End an unconfirmed burst once output has been quiet long enough.
    pub fn tick(&mut self, now: Instant) -> Option<ActivityTransition> {
        if self.state != (ActivityState::Active { confirmed: false }) {
            return None;
        }
        let last = self.last_output?;
        let burst_age = self
            .burst_started
            .map(|start| last.saturating_duration_since(start))
            .unwrap_or_default();
        let debounce = if burst_age > self.config.long_activity_threshold() {
            self.config.idle_debounce_long()
        } else {
            self.config.idle_debounce_short()
        };
        if now.saturating_duration_since(last) >= debounce {
            crate::debug_log!(
                "ACTIVITY",
                "heuristic idle after {:?} quiet (burst {:?})",
                debounce,
                burst_age
            );
            return Some(self.end());
        }
        None
    }

    /// Record whether this session is the one on screen.
    ///
    /// Becoming visible opens the switch grace period and clears a stale
    /// completion checkmark.
    pub fn set_visible(&mut self, visible: bool, now: Instant) {
        if visible && !self.visible {
            self.visible_since = Some(now);
            self.activity_completed = false;
        }
        self.visible = visible;
    }

    /// Forget a pane that left the session.
    pub fn remove_pane(&mut self, pane: PaneId) -> Option<ActivityTransition> {
        if self.busy_panes.remove(&pane) {
            return self.end_if_all_idle();
        }
        None
    }

    fn on_output(&mut self, bytes: usize, now: Instant) -> Option<ActivityTransition> {
        if bytes == 0 || self.has_osc_support || !self.config.heuristic_enabled {
            return None;
        }
        if self.visible
            && self
                .visible_since
                .is_some_and(|since| now.saturating_duration_since(since) < self.config.switch_grace())
        {
            crate::debug_trace!("ACTIVITY", "ignoring {} bytes inside switch grace", bytes);
            return None;
        }

        let crossed = self
            .window
            .record(bytes, now, self.config.window(), self.config.byte_threshold);
        match self.state {
            ActivityState::Idle if crossed => Some(self.start(false, now)),
            ActivityState::Idle => None,
            ActivityState::Active { confirmed: false } => {
                self.last_output = Some(now);
                None
            }
            ActivityState::Active { confirmed: true } => None,
        }
    }

    fn latch_osc_support(&mut self) {
        if !self.has_osc_support {
            self.has_osc_support = true;
            crate::debug_info!("ACTIVITY", "shell integration detected; heuristic disabled");
        }
    }

    fn end_if_all_idle(&mut self) -> Option<ActivityTransition> {
        if self.busy_panes.is_empty() && self.state.is_active() {
            return Some(self.end());
        }
        None
    }

    fn start(&mut self, confirmed: bool, now: Instant) -> ActivityTransition {
        self.state = ActivityState::Active { confirmed };
        self.burst_started = Some(now);
        self.last_output = Some(now);
        self.has_activity = true;
        self.activity_completed = false;
        crate::debug_info!("ACTIVITY", "session active (confirmed={})", confirmed);
        ActivityTransition::Started { confirmed }
    }

    fn end(&mut self) -> ActivityTransition {
        self.state = ActivityState::Idle;
        self.burst_started = None;
        self.last_output = None;
        self.has_activity = false;
        self.activity_completed = !self.visible;
        crate::debug_info!(
            "ACTIVITY",
            "session idle (checkmark={})",
            self.activity_completed
        );
        ActivityTransition::Ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn engine() -> ActivityEngine {
        ActivityEngine::new(ActivityConfig::default())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_heuristic_starts_and_debounces() {
        let mut e = engine();
        let t0 = Instant::now();
        assert_eq!(e.mark_session_activity(100, t0), None);
        assert_eq!(
            e.mark_session_activity(600, t0 + ms(50)),
            Some(ActivityTransition::Started { confirmed: false })
        );
        assert!(e.has_activity());

        assert_eq!(e.tick(t0 + ms(1000)), None);
        assert_eq!(e.tick(t0 + ms(1550)), Some(ActivityTransition::Ended));
        assert!(!e.has_activity());
        assert!(e.activity_completed());
    }

    #[test]
    fn test_heuristic_fires_once_per_window() {
        let mut e = engine();
        let t0 = Instant::now();
        let mut started = 0;
        for i in 0..100 {
            if let Some(ActivityTransition::Started { .. }) =
                e.mark_session_activity(4096, t0 + ms(i))
            {
                started += 1;
            }
            // Force idle between chunks; the window must still refuse to refire.
            if e.state().is_active() {
                e.end();
            }
        }
        assert_eq!(started, 1);
    }

    #[test]
    fn test_long_burst_uses_long_debounce() {
        let mut e = engine();
        let t0 = Instant::now();
        e.mark_session_activity(1024, t0);
        // Keep output flowing for 11 seconds.
        for s in 1..=11 {
            e.mark_session_activity(10, t0 + Duration::from_secs(s));
            assert_eq!(e.tick(t0 + Duration::from_secs(s)), None);
        }
        let last = t0 + Duration::from_secs(11);
        assert_eq!(e.tick(last + ms(2000)), None);
        assert_eq!(e.tick(last + ms(5000)), Some(ActivityTransition::Ended));
    }

    #[test]
    fn test_osc_command_single_transition() {
        let mut e = engine();
        let t0 = Instant::now();
        e.apply(ActivitySignal::OscSupported, t0);
        assert_eq!(
            e.mark_pane_osc_busy(1, t0),
            Some(ActivityTransition::Started { confirmed: true })
        );
        for i in 0..20 {
            assert_eq!(e.mark_session_activity(10_000, t0 + ms(i * 100)), None);
            assert_eq!(e.tick(t0 + ms(i * 100 + 50)), None);
        }
        assert_eq!(
            e.mark_pane_osc_idle(1, t0 + ms(3000)),
            Some(ActivityTransition::Ended)
        );
        assert_eq!(e.mark_pane_osc_idle(1, t0 + ms(3001)), None);
    }

    #[test]
    fn test_osc_latch_disables_heuristic() {
        let mut e = engine();
        let t0 = Instant::now();
        e.apply(ActivitySignal::OscSupported, t0);
        assert_eq!(e.mark_session_activity(100_000, t0), None);
        assert!(e.has_osc_support());
        assert_eq!(e.state(), ActivityState::Idle);
    }

    #[test]
    fn test_osc_confirms_heuristic_burst() {
        let mut e = engine();
        let t0 = Instant::now();
        e.mark_session_activity(1000, t0);
        assert_eq!(
            e.mark_pane_osc_busy(2, t0 + ms(10)),
            Some(ActivityTransition::Confirmed)
        );
        // Debounce no longer applies.
        assert_eq!(e.tick(t0 + ms(60_000)), None);
        assert_eq!(
            e.mark_pane_osc_idle(2, t0 + ms(60_001)),
            Some(ActivityTransition::Ended)
        );
    }

    #[test]
    fn test_two_panes_busy_until_both_idle() {
        let mut e = engine();
        let t0 = Instant::now();
        e.mark_pane_osc_busy(1, t0);
        assert_eq!(e.mark_pane_osc_idle(2, t0 + ms(5)), None);
        assert!(e.has_activity());
        e.mark_pane_osc_busy(2, t0 + ms(10));
        assert_eq!(e.mark_pane_osc_idle(1, t0 + ms(20)), None);
        assert!(e.is_pane_busy(2));
        assert_eq!(
            e.mark_pane_osc_idle(2, t0 + ms(30)),
            Some(ActivityTransition::Ended)
        );
    }

    #[test]
    fn test_visible_session_gets_no_checkmark() {
        let mut e = engine();
        let t0 = Instant::now();
        e.set_visible(true, t0);
        e.mark_pane_osc_busy(1, t0 + ms(900));
        e.mark_pane_osc_idle(1, t0 + ms(1000));
        assert!(!e.has_activity());
        assert!(!e.activity_completed());
    }

    #[test]
    fn test_switch_grace_suppresses_output() {
        let mut e = engine();
        let t0 = Instant::now();
        e.set_visible(true, t0);
        assert_eq!(e.mark_session_activity(10_000, t0 + ms(100)), None);
        assert_eq!(
            e.mark_session_activity(10_000, t0 + ms(900)),
            Some(ActivityTransition::Started { confirmed: false })
        );
    }

    #[test]
    fn test_becoming_visible_clears_checkmark() {
        let mut e = engine();
        let t0 = Instant::now();
        e.mark_pane_osc_busy(1, t0);
        e.mark_pane_osc_idle(1, t0 + ms(10));
        assert!(e.activity_completed());
        e.set_visible(true, t0 + ms(20));
        assert!(!e.activity_completed());
    }

    #[test]
    fn test_removing_last_busy_pane_goes_idle() {
        let mut e = engine();
        let t0 = Instant::now();
        e.mark_pane_osc_busy(3, t0);
        assert_eq!(e.remove_pane(4), None);
        assert_eq!(e.remove_pane(3), Some(ActivityTransition::Ended));
    }
}
