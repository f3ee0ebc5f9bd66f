//! Command-line flags for hosts that expose logger setup on their CLI.
//!
//! Flatten [`LogArgs`] into a `clap` parser and call [`LogArgs::init`].

use std::path::PathBuf;

use clap::Args;

use crate::config::{load_config, ConfigError, LoggerConfig};
use crate::logger::global;

#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Write records to a file instead of stdout (always JSON)
    #[arg(long)]
    pub save_to_file: bool,

    /// Log file path, defaults to out.log when saving to a file
    #[arg(long, default_value = "")]
    pub log_file: String,

    /// Minimum level: debug, info, warn or error
    #[arg(long, default_value = "debug")]
    pub log_level: String,

    /// Console encoding: json or console
    #[arg(long)]
    pub log_encoding: Option<String>,

    /// TOML logger configuration; overrides the other log flags
    #[arg(long)]
    pub log_config: Option<PathBuf>,
}

impl LogArgs {
    pub fn to_config(&self) -> Result<LoggerConfig, ConfigError> {
        match &self.log_config {
            Some(path) => load_config(path),
            None => Ok(LoggerConfig::resolve(
                self.save_to_file,
                &self.log_file,
                &self.log_level,
                self.log_encoding.as_deref(),
            )),
        }
    }

    /// Initialize the global logger from these flags.
    pub fn init(&self) -> Result<(), ConfigError> {
        global::init_with_config(self.to_config()?)
    }
}
