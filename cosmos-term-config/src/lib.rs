//! Configuration system for the cosmos-term session core.
//!
//! This crate provides configuration loading, saving, and default values
//! for the session core. It includes:
//!
//! - The `Config` struct and its grouped sub-configs (activity, pipeline, shell)
//! - `default_*` functions used as serde defaults
//! - YAML persistence with atomic writes
//! - Typed `ConfigError` values for callers that need to match on failures

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::{ActivityConfig, Config, PipelineConfig, ShellConfig};
pub use error::ConfigError;
pub use types::{LogLevel, PaneId};
