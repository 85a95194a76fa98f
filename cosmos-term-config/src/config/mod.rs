//! Session-core configuration.
//!
//! # Sub-modules
//!
//! - [`config_struct`]: `Config` and its grouped sub-configs with `Default` impls
//! - [`persistence`]: `impl Config` methods for load/save and path resolution
//! - [`validation`]: `impl Config` semantic checks

pub mod config_struct;
pub mod persistence;
pub mod validation;

pub use config_struct::{ActivityConfig, Config, PipelineConfig, ShellConfig};
