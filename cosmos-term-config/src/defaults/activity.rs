//! Default values for the busy/idle activity engine.

pub fn activity_window_ms() -> u64 {
    1000
}

pub fn activity_byte_threshold() -> usize {
    512
}

pub fn idle_debounce_short_ms() -> u64 {
    1500
}

pub fn idle_debounce_long_ms() -> u64 {
    5000
}

pub fn long_activity_threshold_ms() -> u64 {
    10_000 // bursts longer than this switch to the long idle debounce
}

pub fn switch_grace_ms() -> u64 {
    800 // swallows the repaint burst of a freshly revealed pane
}
