//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! init flags / TOML file / CLI args
//!     → schema.rs (LoggerConfig, lenient Level & Encoding)
//!     → LoggerConfig::normalized (default file path, JSON for files)
//!     → Logger::new (sink + encoder)
//!     → atomic swap into the global slot
//! ```
//!
//! # Design Decisions
//! - Bad level or encoding names are normalized, never rejected
//! - All fields have defaults to allow minimal configs
//! - Config is immutable once a logger is built; changes require re-init

pub mod loader;
pub mod schema;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{Encoding, Level, LoggerConfig, SinkTarget, UnknownLevel, DEFAULT_FILE_PATH};
