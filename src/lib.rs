//! Structured logging facade.
//!
//! One process-wide logger with leveled, field-based emission to stdout or a
//! file, JSON or console encoding, and B3 trace-correlation fields taken from
//! a request context.
//!
//! ```no_run
//! use logfacade::{field, RequestContext};
//!
//! logfacade::init(false, "", "info", Some("json"))?;
//! logfacade::info("server started", &[field::int("port", 8080)]);
//! logfacade::warnf!("{} retries left", 2);
//!
//! let ctx = RequestContext::new().with_new_trace();
//! logfacade::with_context(Some(&ctx)).info("handling request", &[]);
//! # Ok::<(), logfacade::ConfigError>(())
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod encoding;
pub mod field;
pub mod logger;
pub mod observability;
pub mod sink;

pub use config::{ConfigError, Encoding, Level, LoggerConfig};
pub use context::{ContextLookup, RequestContext};
pub use field::{Field, FieldValue};
pub use logger::global::{
    debug, debugf, error, errorf, fatal, fatalf, info, infof, init, init_with_config,
    is_initialized, logger, panic, panicf, set_global, sync, warn, warnf, with_context,
    with_fields,
};
pub use logger::{exit_process, Logger, LoggerBuilder};
pub use observability::install_bridge;

/// Formatted `debug` record on the global logger.
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => {
        $crate::debugf(::core::format_args!($($arg)+))
    };
}

/// Formatted `info` record on the global logger.
#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => {
        $crate::infof(::core::format_args!($($arg)+))
    };
}

/// Formatted `warn` record on the global logger.
#[macro_export]
macro_rules! warnf {
    ($($arg:tt)+) => {
        $crate::warnf(::core::format_args!($($arg)+))
    };
}

/// Formatted `error` record on the global logger.
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => {
        $crate::errorf(::core::format_args!($($arg)+))
    };
}

/// Formatted `panic` record on the global logger, then panic.
#[macro_export]
macro_rules! panicf {
    ($($arg:tt)+) => {
        $crate::panicf(::core::format_args!($($arg)+))
    };
}

/// Formatted `fatal` record on the global logger, then exit.
#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)+) => {
        $crate::fatalf(::core::format_args!($($arg)+))
    };
}
