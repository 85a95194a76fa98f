//! Default value functions for configuration.
//!
//! Each sub-module groups related `default_*` free functions used as
//! `#[serde(default = "crate::defaults::...")]` attributes on config fields.

mod activity;
mod misc;
mod terminal;

// ── Activity engine ────────────────────────────────────────────────────────
pub use activity::{
    activity_byte_threshold, activity_window_ms, idle_debounce_long_ms, idle_debounce_short_ms,
    long_activity_threshold_ms, switch_grace_ms,
};

// ── Terminal behaviour ─────────────────────────────────────────────────────
pub use terminal::{
    accelerated_renderer, cols, kitty_stack_limit, login_shell, resize_throttle_ms, rows,
    shell_args,
};

// ── Misc ───────────────────────────────────────────────────────────────────
pub use misc::bool_true;
