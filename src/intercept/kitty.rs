//! Kitty keyboard protocol negotiation.
//!
//! Applications push and pop enhancement flags on a per-screen stack and may
//! query the active flags. The renderer does not implement the protocol, so
//! these sequences are answered here and stripped:
//!
//! - `CSI ? u`         query, answered with `CSI ? <flags> u`
//! - `CSI > <flags> u` push (flags default to 0)
//! - `CSI < <n> u`     pop `n` entries (default 1, 0 pops everything)

use super::{InterceptEvent, has_escape, remove_ranges};
use regex::bytes::Regex;
use std::sync::LazyLock;

/// Bit 0 of the flags word: report ambiguous keys with CSI u
pub const DISAMBIGUATE_ESCAPE_CODES: u32 = 0b1;

static KITTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)\x1b\[(?:\?|([<>])(\d*))u")
        .expect("KITTY_RE is a valid static regex pattern")
});

/// Per-pane stack of keyboard enhancement flag words.
///
/// An empty stack is legacy mode. Depth is capped; pushing past the cap drops
/// the oldest entry.
#[derive(Debug, Clone)]
pub struct KittyModeStack {
    stack: Vec<u32>,
    limit: usize,
}

impl KittyModeStack {
    pub fn new(limit: usize) -> Self {
        Self {
            stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn push(&mut self, flags: u32) {
        if self.stack.len() >= self.limit {
            self.stack.remove(0);
        }
        self.stack.push(flags);
    }

    /// Pop `count` entries; 0 empties the stack.
    pub fn pop(&mut self, count: u32) {
        if count == 0 {
            self.stack.clear();
            return;
        }
        let keep = self.stack.len().saturating_sub(count as usize);
        self.stack.truncate(keep);
    }

    /// Flags currently in effect (0 in legacy mode)
    pub fn active_flags(&self) -> u32 {
        self.stack.last().copied().unwrap_or(0)
    }

    /// Whether ambiguous keys must be sent as CSI u sequences
    pub fn disambiguate(&self) -> bool {
        self.active_flags() & DISAMBIGUATE_ESCAPE_CODES != 0
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }
}

/// Apply and strip every Kitty keyboard sequence in `data`.
///
/// Matches are collected first and removed in one pass. Queries see the
/// stack as left by the sequences before them in the same batch.
pub fn strip(data: Vec<u8>, stack: &mut KittyModeStack, events: &mut Vec<InterceptEvent>) -> Vec<u8> {
    if !has_escape(&data) {
        return data;
    }

    let mut ranges = Vec::new();
    for caps in KITTY_RE.captures_iter(&data) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        ranges.push(whole.range());

        let arg = caps.get(2).map(|m| m.as_bytes()).unwrap_or_default();
        match caps.get(1).map(|m| m.as_bytes()) {
            Some(b">") => {
                let flags = parse_number(arg).unwrap_or(0);
                stack.push(flags);
                crate::debug_log!("KITTY", "push flags={} depth={}", flags, stack.depth());
            }
            Some(_) => {
                // Overflowing counts can only mean "more than the stack holds".
                let count = parse_number(arg).unwrap_or(if arg.is_empty() { 1 } else { u32::MAX });
                stack.pop(count);
                crate::debug_log!("KITTY", "pop count={} depth={}", count, stack.depth());
            }
            None => {
                let reply = format!("\x1b[?{}u", stack.active_flags()).into_bytes();
                crate::debug_log!("KITTY", "query -> flags={}", stack.active_flags());
                events.push(InterceptEvent::KittyReply(reply));
            }
        }
    }

    if ranges.is_empty() {
        data
    } else {
        remove_ranges(&data, &ranges)
    }
}

fn parse_number(digits: &[u8]) -> Option<u32> {
    std::str::from_utf8(digits).ok()?.parse().ok()
}
