//! Process-wide logger.
//!
//! # Responsibilities
//! - Hold the current global [`Logger`] in an atomically swappable slot
//! - Lazily install a console/debug default on first use
//! - Forward the free logging functions to the current logger
//!
//! # Design Decisions
//! - Readers load the slot lock-free; initialization is serialized by one mutex
//! - Lazy init re-checks under the lock, so concurrent first use builds the
//!   default exactly once
//! - Explicit initialization always replaces the current logger (last wins)

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arc_swap::ArcSwapOption;

use super::{exit_process, Logger};
use crate::config::{ConfigError, Level, LoggerConfig};
use crate::context::ContextLookup;
use crate::field::{self, Field};

static GLOBAL: ArcSwapOption<Logger> = ArcSwapOption::const_empty();
static INIT_LOCK: Mutex<()> = Mutex::new(());

fn lock_init() -> MutexGuard<'static, ()> {
    INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Initialize the global logger from raw option values.
///
/// `level` is matched case-insensitively (unknown values mean DEBUG);
/// `encoding` only matters for console output, where `Some("json")` selects
/// JSON. File output with an empty `file_path` writes to `out.log`.
///
/// ```no_run
/// // Console, human-readable.
/// logfacade::init(false, "", "debug", None)?;
/// // Console, JSON.
/// logfacade::init(false, "", "debug", Some("json"))?;
/// // File, always JSON.
/// logfacade::init(true, "logs/out.log", "info", None)?;
/// # Ok::<(), logfacade::ConfigError>(())
/// ```
pub fn init(
    save_to_file: bool,
    file_path: &str,
    level: &str,
    encoding: Option<&str>,
) -> Result<(), ConfigError> {
    init_with_config(LoggerConfig::resolve(save_to_file, file_path, level, encoding))
}

/// Initialize the global logger from a prepared configuration.
pub fn init_with_config(config: LoggerConfig) -> Result<(), ConfigError> {
    let _guard = lock_init();
    install(Logger::new(config)?);
    Ok(())
}

/// Install an explicitly built logger as the global one.
pub fn set_global(logger: Logger) {
    let _guard = lock_init();
    install(logger);
}

fn install(logger: Logger) -> Logger {
    GLOBAL.store(Some(Arc::new(logger.clone())));
    announce(&logger);
    logger
}

fn announce(logger: &Logger) {
    let config = logger.config();
    let mut fields = vec![field::bool("save_to_file", config.save_to_file)];
    if config.save_to_file {
        fields.push(field::string("file_path", config.file_path.display().to_string()));
    }
    fields.push(field::string("log_level", config.level.as_str()));
    fields.push(field::string("encoding", config.encoding.as_str()));
    logger.info("logger initialized", &fields);
}

/// True once a global logger has been installed.
pub fn is_initialized() -> bool {
    GLOBAL.load().is_some()
}

/// The current global logger, installing the default on first use.
///
/// Exits the process if the default cannot be built, since there is no
/// logger to report the failure through.
pub fn logger() -> Logger {
    if let Some(current) = GLOBAL.load_full() {
        return Logger::clone(&current);
    }

    let _guard = lock_init();
    if let Some(current) = GLOBAL.load_full() {
        return Logger::clone(&current);
    }

    match Logger::new(LoggerConfig::default()) {
        Ok(logger) => install(logger),
        Err(e) => {
            eprintln!("logfacade: default logger initialization failed: {}", e);
            exit_process(1)
        }
    }
}

/// Global logger with `fields` pre-bound.
pub fn with_fields(fields: &[Field]) -> Logger {
    logger().with(fields)
}

/// Global logger carrying the trace-correlation keys found in `ctx`.
pub fn with_context(ctx: Option<&dyn ContextLookup>) -> Logger {
    logger().with_context(ctx)
}

/// Flush the global logger's sink.
pub fn sync() {
    if let Some(current) = GLOBAL.load_full() {
        current.sync();
    }
}

#[track_caller]
pub fn debug(msg: &str, fields: &[Field]) {
    logger().debug(msg, fields);
}

#[track_caller]
pub fn info(msg: &str, fields: &[Field]) {
    logger().info(msg, fields);
}

#[track_caller]
pub fn warn(msg: &str, fields: &[Field]) {
    logger().warn(msg, fields);
}

#[track_caller]
pub fn error(msg: &str, fields: &[Field]) {
    logger().error(msg, fields);
}

#[track_caller]
pub fn panic(msg: &str, fields: &[Field]) -> ! {
    logger().panic(msg, fields)
}

#[track_caller]
pub fn fatal(msg: &str, fields: &[Field]) -> ! {
    logger().fatal(msg, fields)
}

#[track_caller]
pub fn debugf(args: fmt::Arguments<'_>) {
    logger().log_fmt(Level::Debug, args);
}

#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    logger().log_fmt(Level::Info, args);
}

#[track_caller]
pub fn warnf(args: fmt::Arguments<'_>) {
    logger().log_fmt(Level::Warn, args);
}

#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    logger().log_fmt(Level::Error, args);
}

#[track_caller]
pub fn panicf(args: fmt::Arguments<'_>) -> ! {
    logger().panic(&args.to_string(), &[])
}

#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    logger().fatal(&args.to_string(), &[])
}
