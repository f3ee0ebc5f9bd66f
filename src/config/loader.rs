//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::LoggerConfig;

/// Error type for configuration and logger construction.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The output path has no file name component.
    #[error("Invalid log file path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// The file sink could not be created.
    #[error("Failed to open log file {}: {source}", .path.display())]
    OpenSink {
        path: PathBuf,
        #[source]
        source: tracing_appender::rolling::InitError,
    },

    /// A global `tracing` subscriber was already installed.
    #[error("Failed to install tracing bridge: {0}")]
    BridgeInstall(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Parse a configuration from TOML text and apply the file-output rules.
pub fn parse_config(content: &str) -> Result<LoggerConfig, ConfigError> {
    let config: LoggerConfig = toml::from_str(content)?;
    Ok(config.normalized())
}

/// Load a configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LoggerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

impl LoggerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        parse_config(content)
    }
}
