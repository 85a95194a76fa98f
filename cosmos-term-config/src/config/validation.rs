//! Semantic validation for `Config`.

use super::config_struct::Config;
use crate::error::ConfigError;

impl Config {
    /// Reject values that would disable a timer or invert the idle debounce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let activity = &self.activity;
        if activity.window_ms == 0 {
            return Err(ConfigError::Validation(
                "activity.window_ms must be greater than zero".to_string(),
            ));
        }
        if activity.byte_threshold == 0 {
            return Err(ConfigError::Validation(
                "activity.byte_threshold must be greater than zero".to_string(),
            ));
        }
        if activity.idle_debounce_short_ms == 0 {
            return Err(ConfigError::Validation(
                "activity.idle_debounce_short_ms must be greater than zero".to_string(),
            ));
        }
        if activity.idle_debounce_long_ms < activity.idle_debounce_short_ms {
            return Err(ConfigError::Validation(format!(
                "activity.idle_debounce_long_ms ({}) must not be shorter than idle_debounce_short_ms ({})",
                activity.idle_debounce_long_ms, activity.idle_debounce_short_ms
            )));
        }
        if self.pipeline.kitty_stack_limit == 0 {
            return Err(ConfigError::Validation(
                "pipeline.kitty_stack_limit must be greater than zero".to_string(),
            ));
        }
        if self.shell.rows == 0 || self.shell.cols == 0 {
            return Err(ConfigError::Validation(
                "shell.rows and shell.cols must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
