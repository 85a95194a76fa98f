//! Command-line interface for cosmos-term.
//!
//! Parses the flags for a single-pane run and turns them into
//! [`RuntimeOptions`], which override the loaded configuration.

use clap::Parser;
use cosmos_term_config::{Config, ConfigError, LogLevel};
use std::path::PathBuf;

/// cosmos-term - run a shell through the session core
#[derive(Parser, Debug)]
#[command(name = "cosmos-term")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shell to run (absolute path or a known shell name)
    #[arg(long, value_name = "SHELL")]
    pub shell: Option<String>,

    /// Working directory for the shell (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Terminal rows (default: from config)
    #[arg(long, value_name = "ROWS")]
    pub rows: Option<u16>,

    /// Terminal columns (default: from config)
    #[arg(long, value_name = "COLS")]
    pub cols: Option<u16>,

    /// Log level for the debug log: off, error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL", value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,

    /// Configuration file (default: the per-user config.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    LogLevel::from_name(s).ok_or_else(|| format!("unknown log level '{}'", s))
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    pub shell: Option<String>,
    pub cwd: Option<PathBuf>,
    pub rows: Option<u16>,
    pub cols: Option<u16>,
    pub log_level: Option<LogLevel>,
    pub config_path: Option<PathBuf>,
}

impl From<Cli> for RuntimeOptions {
    fn from(cli: Cli) -> Self {
        Self {
            shell: cli.shell,
            cwd: cli.cwd,
            rows: cli.rows,
            cols: cli.cols,
            log_level: cli.log_level,
            config_path: cli.config,
        }
    }
}

impl RuntimeOptions {
    /// Apply command-line overrides on top of a loaded config and validate
    /// the result, since the overrides bypass the loader's checks.
    pub fn apply_to(&self, config: &mut Config) -> Result<(), ConfigError> {
        if let Some(shell) = &self.shell {
            config.shell.shell = Some(shell.clone());
        }
        if let Some(rows) = self.rows {
            config.shell.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.shell.cols = cols;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        config.validate()
    }
}

/// Parse the process arguments
pub fn process_cli() -> RuntimeOptions {
    Cli::parse().into()
}
