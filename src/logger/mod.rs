//! Logger handle and record emission.
//!
//! # Responsibilities
//! - Build a logger from a resolved [`LoggerConfig`]
//! - Filter by level, assemble records, encode and write them
//! - Pre-bind fields (`with`, `with_context`)
//! - Panic and fatal emission, process exit
//!
//! # Design Decisions
//! - A `Logger` is a cheap handle: shared core behind `Arc` plus its own
//!   bound fields, so derived loggers never affect their parent
//! - Caller locations come from `#[track_caller]`; any wrapper that is itself
//!   `#[track_caller]` reports its own caller's location
//! - No locking on the emission path beyond what the sink does per write

pub mod global;

use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use chrono::Local;
use tracing_subscriber::fmt::writer::MakeWriter;

use crate::config::{ConfigError, Level, LoggerConfig};
use crate::context::{self, ContextLookup};
use crate::encoding::{self, Caller, Encoder, Record};
use crate::field::Field;
use crate::sink::Sink;

/// Terminate the process with `code`.
///
/// This is the only place the crate exits the process; [`Logger::fatal`] and
/// a failed lazy default initialization both end here.
pub fn exit_process(code: i32) -> ! {
    std::process::exit(code)
}

/// Capacity kept in the per-thread encode buffer between records.
const RETAINED_BUF_CAPACITY: usize = 4096;

thread_local! {
    static ENCODE_BUF: RefCell<Vec<u8>> = const { RefCell::new(Vec::new()) };
}

struct Core {
    config: LoggerConfig,
    encoder: Box<dyn Encoder>,
    sink: Sink,
}

/// Structured logger handle.
#[derive(Clone)]
pub struct Logger {
    core: Arc<Core>,
    fields: Vec<Field>,
}

/// Builder for [`Logger`], mainly to substitute the output writer.
pub struct LoggerBuilder {
    config: LoggerConfig,
    sink: Option<Sink>,
}

impl LoggerBuilder {
    /// Write to `writer` instead of the configured target.
    pub fn with_writer<W>(mut self, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.sink = Some(Sink::from_writer(writer));
        self
    }

    pub fn build(self) -> Result<Logger, ConfigError> {
        let config = self.config.normalized();
        let sink = match self.sink {
            Some(sink) => sink,
            None => Sink::open(&config.sink_target())?,
        };
        let encoder = encoding::encoder_for(config.encoding, config.time_format());

        Ok(Logger {
            core: Arc::new(Core {
                config,
                encoder,
                sink,
            }),
            fields: Vec::new(),
        })
    }
}

impl Logger {
    pub fn builder(config: LoggerConfig) -> LoggerBuilder {
        LoggerBuilder { config, sink: None }
    }

    /// Build a logger writing to the configured target.
    pub fn new(config: LoggerConfig) -> Result<Self, ConfigError> {
        Self::builder(config).build()
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.core.config
    }

    /// Fields bound to this handle.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// True when both handles share the same underlying core.
    pub fn ptr_eq(a: &Logger, b: &Logger) -> bool {
        Arc::ptr_eq(&a.core, &b.core)
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.core.config.level
    }

    /// A logger that adds `fields` to every record, after any already bound.
    pub fn with(&self, fields: &[Field]) -> Logger {
        let mut bound = self.fields.clone();
        bound.extend_from_slice(fields);
        Logger {
            core: Arc::clone(&self.core),
            fields: bound,
        }
    }

    /// A logger carrying the trace-correlation keys found in `ctx`.
    ///
    /// Returns a plain clone when `ctx` is `None` or holds none of the keys.
    pub fn with_context(&self, ctx: Option<&dyn ContextLookup>) -> Logger {
        match context::trace_field(ctx) {
            Some(field) => self.with(&[field]),
            None => self.clone(),
        }
    }

    #[track_caller]
    pub fn log(&self, level: Level, msg: &str, fields: &[Field]) {
        self.emit(level, msg, fields, Some(Caller::from(Location::caller())));
    }

    #[track_caller]
    pub fn debug(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Debug, msg, fields);
    }

    #[track_caller]
    pub fn info(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Info, msg, fields);
    }

    #[track_caller]
    pub fn warn(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Warn, msg, fields);
    }

    #[track_caller]
    pub fn error(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Error, msg, fields);
    }

    /// Log at `panic` level, then panic with `msg`.
    #[track_caller]
    pub fn panic(&self, msg: &str, fields: &[Field]) -> ! {
        self.log(Level::Panic, msg, fields);
        panic!("{}", msg)
    }

    /// Log at `fatal` level, flush, then exit the process with status 1.
    #[track_caller]
    pub fn fatal(&self, msg: &str, fields: &[Field]) -> ! {
        self.log(Level::Fatal, msg, fields);
        self.sync();
        exit_process(1)
    }

    /// Formatted variant of [`Logger::log`]; `args` is only rendered when
    /// `level` is enabled.
    #[track_caller]
    pub fn log_fmt(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            self.log(level, &args.to_string(), &[]);
        }
    }

    pub fn sync(&self) {
        self.core.sink.flush();
    }

    /// Write one record if `level` is enabled.
    pub(crate) fn emit(&self, level: Level, msg: &str, fields: &[Field], caller: Option<Caller>) {
        if !self.enabled(level) {
            return;
        }

        let config = &self.core.config;
        let stacktrace = (!config.disable_stacktrace && level >= Level::Error)
            .then(|| Backtrace::force_capture().to_string());
        let record = Record {
            level,
            time: Local::now(),
            caller: caller.filter(|_| config.add_caller),
            message: msg,
            bound: &self.fields,
            fields,
            stacktrace,
        };

        ENCODE_BUF.with(|cell| match cell.try_borrow_mut() {
            Ok(mut buf) => {
                buf.clear();
                self.write_encoded(&record, &mut buf);
                if buf.capacity() > RETAINED_BUF_CAPACITY {
                    buf.clear();
                    buf.shrink_to(RETAINED_BUF_CAPACITY);
                }
            }
            // Re-entrant call while encoding (e.g. a Display impl that logs).
            Err(_) => self.write_encoded(&record, &mut Vec::new()),
        });
    }

    fn write_encoded(&self, record: &Record<'_>, buf: &mut Vec<u8>) {
        match self.core.encoder.encode(record, buf) {
            Ok(()) => self.core.sink.write_record(buf),
            Err(e) => eprintln!("logfacade: failed to encode record: {}", e),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.core.config)
            .field("sink", &self.core.sink)
            .field("fields", &self.fields)
            .finish()
    }
}
