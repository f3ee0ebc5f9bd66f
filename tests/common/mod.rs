//! Shared utilities for integration tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use logfacade::sink::BufferWriter;
use logfacade::{Logger, LoggerConfig};
use serde_json::Value;

static GLOBAL_SERIAL: Mutex<()> = Mutex::new(());

/// Serialize tests that swap the global logger.
pub fn serial() -> MutexGuard<'static, ()> {
    GLOBAL_SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Install a global logger writing into a fresh buffer.
///
/// The initialization record is cleared before returning.
#[allow(dead_code)]
pub fn capture_global(config: LoggerConfig) -> BufferWriter {
    let buffer = BufferWriter::new();
    let logger = Logger::builder(config).with_writer(buffer.clone()).build().unwrap();
    logfacade::set_global(logger);
    buffer.clear();
    buffer
}

/// Parse every buffered line as a JSON record.
#[allow(dead_code)]
pub fn records(buffer: &BufferWriter) -> Vec<Value> {
    buffer
        .lines()
        .iter()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

/// JSON output, debug level, no stack traces.
#[allow(dead_code)]
pub fn json_config() -> LoggerConfig {
    LoggerConfig {
        encoding: logfacade::Encoding::Json,
        disable_stacktrace: true,
        ..LoggerConfig::default()
    }
}
