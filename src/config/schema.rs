//! Configuration schema definitions.
//!
//! This module defines the logger configuration and the small enums it is
//! built from. Level and encoding names are matched leniently: an unknown
//! level resolves to `debug`, an unknown encoding resolves to `console`.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::encoding::TimeFormat;

/// File name used when file output is requested without a path.
pub const DEFAULT_FILE_PATH: &str = "out.log";

/// Severity of a record.
///
/// Only `Debug` through `Error` are valid as a configured threshold; `Panic`
/// and `Fatal` exist for emission and are always enabled. A higher threshold
/// is capped to `Error` by [`LoggerConfig::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Panic,
    Fatal,
}

impl Level {
    /// Resolve a configured threshold name, case-insensitively.
    ///
    /// Anything other than DEBUG, INFO, WARN or ERROR becomes `Debug`.
    pub fn parse_lenient(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "INFO" => Level::Info,
            "WARN" => Level::Warn,
            "ERROR" => Level::Error,
            _ => Level::Debug,
        }
    }

    /// Lowercase name as written into records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Panic => "panic",
            Level::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by the strict [`Level`] parser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {0}")]
pub struct UnknownLevel(pub String);

impl FromStr for Level {
    type Err = UnknownLevel;

    /// Strict parse accepting every emission level, including `panic` and `fatal`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "panic" => Ok(Level::Panic),
            "fatal" => Ok(Level::Fatal),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Level::parse_lenient(&name))
    }
}

/// Record serialization style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// One JSON object per line.
    Json,
    /// Tab-separated human-readable line.
    #[default]
    Console,
}

impl Encoding {
    /// Only an explicit `"json"` selects JSON; anything else, or nothing, is console.
    pub fn resolve(name: Option<&str>) -> Self {
        match name {
            Some("json") => Encoding::Json,
            _ => Encoding::Console,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Json => "json",
            Encoding::Console => "console",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Encoding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Encoding::resolve(Some(name.as_str())))
    }
}

/// Where encoded records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkTarget {
    Stdout,
    File(PathBuf),
}

/// Root configuration for the logger.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Write to `file_path` instead of stdout.
    pub save_to_file: bool,

    /// Output file; only read when `save_to_file` is set.
    pub file_path: PathBuf,

    /// Minimum level written.
    pub level: Level,

    /// Record encoding. Forced to JSON for file output.
    pub encoding: Encoding,

    /// Attach the `caller` location to records.
    pub add_caller: bool,

    /// Skip stack trace capture for `error` and above.
    pub disable_stacktrace: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            save_to_file: false,
            file_path: PathBuf::new(),
            level: Level::Debug,
            encoding: Encoding::Console,
            add_caller: true,
            disable_stacktrace: false,
        }
    }
}

impl LoggerConfig {
    /// Resolve a configuration from raw option values.
    ///
    /// ```
    /// use logfacade::config::{Encoding, Level, LoggerConfig};
    ///
    /// let config = LoggerConfig::resolve(true, "", "Warn", Some("console"));
    /// assert_eq!(config.file_path.to_str(), Some("out.log"));
    /// assert_eq!(config.level, Level::Warn);
    /// assert_eq!(config.encoding, Encoding::Json);
    /// ```
    pub fn resolve(
        save_to_file: bool,
        file_path: &str,
        level: &str,
        encoding: Option<&str>,
    ) -> Self {
        Self {
            save_to_file,
            file_path: PathBuf::from(file_path),
            level: Level::parse_lenient(level),
            encoding: Encoding::resolve(encoding),
            ..Self::default()
        }
        .normalized()
    }

    /// Apply the file-output rules (default path, JSON-only encoding) and cap
    /// the threshold at `error`, so `panic` and `fatal` always write.
    pub fn normalized(mut self) -> Self {
        self.level = self.level.min(Level::Error);
        if self.save_to_file {
            if self.file_path.as_os_str().is_empty() {
                self.file_path = PathBuf::from(DEFAULT_FILE_PATH);
            }
            self.encoding = Encoding::Json;
        }
        self
    }

    pub fn sink_target(&self) -> SinkTarget {
        if self.save_to_file {
            let path: &Path = if self.file_path.as_os_str().is_empty() {
                Path::new(DEFAULT_FILE_PATH)
            } else {
                &self.file_path
            };
            SinkTarget::File(path.to_path_buf())
        } else {
            SinkTarget::Stdout
        }
    }

    /// Console output keeps a compact local timestamp; files get ISO-8601.
    pub fn time_format(&self) -> TimeFormat {
        if self.save_to_file {
            TimeFormat::Iso8601
        } else {
            TimeFormat::Console
        }
    }
}
