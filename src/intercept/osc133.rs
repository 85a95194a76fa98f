//! OSC 133 shell-integration prompt marks.
//!
//! `ESC ] 133 ; <A|B|C|D> [; params] (BEL | ESC \)`
//!
//! - `A` prompt start, `D` command finished: the pane is idle
//! - `C` command output begins: the pane is busy
//! - `B` prompt end: only proves the shell is integrated
//!
//! The scan is read-only; the renderer keeps the marks for its own use.

use super::{InterceptEvent, has_escape};
use regex::bytes::Regex;
use std::sync::LazyLock;

static OSC133_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)\x1b\]133;([ABCD])[^\x07\x1b]*(?:\x07|\x1b\\)")
        .expect("OSC133_RE is a valid static regex pattern")
});

/// Report every complete prompt mark in `data`.
pub fn scan(data: &[u8], events: &mut Vec<InterceptEvent>) {
    if !has_escape(data) {
        return;
    }
    for caps in OSC133_RE.captures_iter(data) {
        let kind = caps[1][0];
        events.push(InterceptEvent::OscSupported);
        match kind {
            b'C' => events.push(InterceptEvent::Busy),
            b'A' | b'D' => events.push(InterceptEvent::Idle),
            _ => {}
        }
        crate::debug_trace!("OSC133", "prompt mark {}", kind as char);
    }
}
