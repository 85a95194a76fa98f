//! `Config` and its grouped sub-configs.

use crate::types::LogLevel;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level configuration for the session core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Shell selection and spawn geometry
    #[serde(default)]
    pub shell: ShellConfig,

    /// Busy/idle activity detection
    #[serde(default)]
    pub activity: ActivityConfig,

    /// Output pipeline, resize throttling, and renderer options
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Debug log level (overridden by `--log-level` and `DEBUG_LEVEL`)
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings controlling which shell is spawned for each pane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Absolute shell path or an allowlisted shell name; `None` uses `$SHELL`
    #[serde(default)]
    pub shell: Option<String>,

    /// Extra shell arguments as a single shell-quoted string
    #[serde(default = "crate::defaults::shell_args")]
    pub shell_args: String,

    /// Spawn the shell as a login shell
    #[serde(default = "crate::defaults::login_shell")]
    pub login_shell: bool,

    /// Rows used before the first fit
    #[serde(default = "crate::defaults::rows")]
    pub rows: u16,

    /// Columns used before the first fit
    #[serde(default = "crate::defaults::cols")]
    pub cols: u16,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            shell: None,
            shell_args: crate::defaults::shell_args(),
            login_shell: crate::defaults::login_shell(),
            rows: crate::defaults::rows(),
            cols: crate::defaults::cols(),
        }
    }
}

impl ShellConfig {
    /// Split `shell_args` into individual arguments, honouring shell quoting.
    ///
    /// Unbalanced quotes are logged and yield no arguments rather than a
    /// half-parsed command line.
    pub fn parsed_args(&self) -> Vec<String> {
        if self.shell_args.trim().is_empty() {
            return Vec::new();
        }
        match shell_words::split(&self.shell_args) {
            Ok(args) => args,
            Err(e) => {
                log::warn!("Ignoring malformed shell_args {:?}: {}", self.shell_args, e);
                Vec::new()
            }
        }
    }
}

/// Thresholds for the byte-volume heuristic and idle debouncing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityConfig {
    /// Use the byte-volume fallback for sessions without OSC shell integration
    #[serde(default = "crate::defaults::bool_true")]
    pub heuristic_enabled: bool,

    /// Rolling window length for the byte counter (ms)
    #[serde(default = "crate::defaults::activity_window_ms")]
    pub window_ms: u64,

    /// Bytes within one window that mark a session active
    #[serde(default = "crate::defaults::activity_byte_threshold")]
    pub byte_threshold: usize,

    /// Quiet period before an unconfirmed burst is declared idle (ms)
    #[serde(default = "crate::defaults::idle_debounce_short_ms")]
    pub idle_debounce_short_ms: u64,

    /// Quiet period used once a burst has run past `long_activity_threshold_ms`
    #[serde(default = "crate::defaults::idle_debounce_long_ms")]
    pub idle_debounce_long_ms: u64,

    /// Burst age after which the long debounce applies (ms)
    #[serde(default = "crate::defaults::long_activity_threshold_ms")]
    pub long_activity_threshold_ms: u64,

    /// Output ignored for this long after a session becomes visible (ms)
    #[serde(default = "crate::defaults::switch_grace_ms")]
    pub switch_grace_ms: u64,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            heuristic_enabled: crate::defaults::bool_true(),
            window_ms: crate::defaults::activity_window_ms(),
            byte_threshold: crate::defaults::activity_byte_threshold(),
            idle_debounce_short_ms: crate::defaults::idle_debounce_short_ms(),
            idle_debounce_long_ms: crate::defaults::idle_debounce_long_ms(),
            long_activity_threshold_ms: crate::defaults::long_activity_threshold_ms(),
            switch_grace_ms: crate::defaults::switch_grace_ms(),
        }
    }
}

impl ActivityConfig {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    pub fn idle_debounce_short(&self) -> Duration {
        Duration::from_millis(self.idle_debounce_short_ms)
    }

    pub fn idle_debounce_long(&self) -> Duration {
        Duration::from_millis(self.idle_debounce_long_ms)
    }

    pub fn long_activity_threshold(&self) -> Duration {
        Duration::from_millis(self.long_activity_threshold_ms)
    }

    pub fn switch_grace(&self) -> Duration {
        Duration::from_millis(self.switch_grace_ms)
    }
}

/// Output pipeline, resize and renderer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Minimum spacing between resize requests sent to the backend (ms)
    #[serde(default = "crate::defaults::resize_throttle_ms")]
    pub resize_throttle_ms: u64,

    /// Maximum depth of the per-pane kitty keyboard mode stack
    #[serde(default = "crate::defaults::kitty_stack_limit")]
    pub kitty_stack_limit: usize,

    /// Try the hardware-accelerated renderer backend first
    #[serde(default = "crate::defaults::accelerated_renderer")]
    pub accelerated_renderer: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            resize_throttle_ms: crate::defaults::resize_throttle_ms(),
            kitty_stack_limit: crate::defaults::kitty_stack_limit(),
            accelerated_renderer: crate::defaults::accelerated_renderer(),
        }
    }
}

impl PipelineConfig {
    pub fn resize_throttle(&self) -> Duration {
        Duration::from_millis(self.resize_throttle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_args_respects_quoting() {
        let shell = ShellConfig {
            shell_args: r#"-l -c "echo hi there""#.to_string(),
            ..ShellConfig::default()
        };
        assert_eq!(shell.parsed_args(), vec!["-l", "-c", "echo hi there"]);
    }

    #[test]
    fn test_parsed_args_malformed_is_empty() {
        let shell = ShellConfig {
            shell_args: r#"-c "unterminated"#.to_string(),
            ..ShellConfig::default()
        };
        assert!(shell.parsed_args().is_empty());
    }

    #[test]
    fn test_activity_durations() {
        let activity = ActivityConfig::default();
        assert_eq!(activity.window(), Duration::from_millis(1000));
        assert!(activity.idle_debounce_long() > activity.idle_debounce_short());
    }
}
