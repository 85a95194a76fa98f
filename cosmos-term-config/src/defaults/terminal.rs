//! Default values for terminal-behaviour settings.

pub fn rows() -> u16 {
    24
}

pub fn cols() -> u16 {
    80
}

pub fn login_shell() -> bool {
    false
}

pub fn shell_args() -> String {
    String::new()
}

pub fn resize_throttle_ms() -> u64 {
    100
}

pub fn kitty_stack_limit() -> usize {
    32 // same cap kitty applies to its own stack
}

pub fn accelerated_renderer() -> bool {
    true
}
