//! OSC 9;4 progress reports (ConEmu / Windows Terminal).
//!
//! `ESC ] 9 ; 4 ; <state> [; <percent>] (BEL | ESC \)`
//!
//! | state | meaning                  | percent |
//! |-------|--------------------------|---------|
//! | 0     | remove progress          | no      |
//! | 1     | normal                   | yes     |
//! | 2     | error                    | yes     |
//! | 3     | indeterminate            | no      |
//! | 4     | paused / warning         | yes     |
//!
//! Any state other than 0 means the pane is busy. Sequences are stripped so
//! renderers that do not understand them never print them.

use super::{InterceptEvent, has_escape, remove_ranges};
use regex::bytes::Regex;
use std::sync::LazyLock;

static OSC_PROGRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)\x1b\]9;4;([0-4])(?:;(\d*))?(?:;[^\x07\x1b]*)?(?:\x07|\x1b\\)")
        .expect("OSC_PROGRESS_RE is a valid static regex pattern")
});

/// Progress bar state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressState {
    Hidden,
    Normal,
    Error,
    Indeterminate,
    Paused,
}

impl ProgressState {
    fn from_param(n: u8) -> Self {
        match n {
            1 => ProgressState::Normal,
            2 => ProgressState::Error,
            3 => ProgressState::Indeterminate,
            4 => ProgressState::Paused,
            _ => ProgressState::Hidden,
        }
    }

    /// Whether this state carries a percentage
    pub fn requires_progress(self) -> bool {
        matches!(
            self,
            ProgressState::Normal | ProgressState::Error | ProgressState::Paused
        )
    }

    /// Whether the pane should count as busy
    pub fn is_active(self) -> bool {
        self != ProgressState::Hidden
    }
}

/// One progress update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub state: ProgressState,
    /// 0-100, present only for states that carry a percentage
    pub percent: Option<u8>,
}

/// Strip progress sequences from `data`, reporting each one.
pub fn strip(data: Vec<u8>, events: &mut Vec<InterceptEvent>) -> Vec<u8> {
    if !has_escape(&data) {
        return data;
    }

    let mut ranges = Vec::new();
    for caps in OSC_PROGRESS_RE.captures_iter(&data) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        ranges.push(whole.range());

        let state = ProgressState::from_param(caps[1][0] - b'0');
        let percent = state.requires_progress().then(|| {
            caps.get(2)
                .and_then(|m| std::str::from_utf8(m.as_bytes()).ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map_or(0, |p| p.min(100) as u8)
        });

        events.push(InterceptEvent::OscSupported);
        events.push(if state.is_active() {
            InterceptEvent::Busy
        } else {
            InterceptEvent::Idle
        });
        events.push(InterceptEvent::Progress(Progress { state, percent }));
        crate::debug_log!("OSC9", "Progress: state={:?}, percent={:?}", state, percent);
    }

    if ranges.is_empty() {
        data
    } else {
        remove_ranges(&data, &ranges)
    }
}
