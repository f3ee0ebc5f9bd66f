//! Record encoding.
//!
//! # Data Flow
//! ```text
//! Logger::emit
//!     → Record (level, ts, caller, msg, bound fields, call fields, stacktrace)
//!     → Encoder::encode (json.rs | console.rs) into a reusable byte buffer
//!     → Sink::write_record (one write per record)
//! ```
//!
//! # Design Decisions
//! - Encoders are stateless apart from their time format, so one instance is
//!   shared by every clone of a logger
//! - Record keys follow the order level, ts, caller, msg, fields, stacktrace

mod console;
mod json;
mod time;

use std::io;
use std::panic::Location;

use chrono::{DateTime, Local};

use crate::config::{Encoding, Level};
use crate::field::Field;

pub use console::ConsoleEncoder;
pub use json::JsonEncoder;
pub use time::TimeFormat;

pub const LEVEL_KEY: &str = "level";
pub const TIME_KEY: &str = "ts";
pub const CALLER_KEY: &str = "caller";
pub const MESSAGE_KEY: &str = "msg";
pub const STACKTRACE_KEY: &str = "stacktrace";

/// Source location reported in the `caller` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub file: &'static str,
    pub line: u32,
}

impl Caller {
    pub fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// `dir/file.rs:line`, keeping only the last two path components.
    pub fn short(&self) -> String {
        let mut parts = self.file.rsplit(['/', '\\']);
        let file = parts.next().unwrap_or(self.file);
        match parts.next() {
            Some(dir) if !dir.is_empty() => format!("{dir}/{file}:{}", self.line),
            _ => format!("{file}:{}", self.line),
        }
    }
}

impl From<&'static Location<'static>> for Caller {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

/// Everything an encoder sees for one log call.
#[derive(Debug)]
pub struct Record<'a> {
    pub level: Level,
    pub time: DateTime<Local>,
    pub caller: Option<Caller>,
    pub message: &'a str,
    /// Fields pre-bound on the logger, written before `fields`.
    pub bound: &'a [Field],
    pub fields: &'a [Field],
    pub stacktrace: Option<String>,
}

impl Record<'_> {
    pub fn all_fields(&self) -> impl Iterator<Item = &Field> {
        self.bound.iter().chain(self.fields.iter())
    }
}

/// Serializes a record into bytes, including the trailing newline.
pub trait Encoder: Send + Sync {
    fn encode(&self, record: &Record<'_>, buf: &mut Vec<u8>) -> io::Result<()>;
}

/// Build the encoder for a resolved configuration.
pub fn encoder_for(encoding: Encoding, time_format: TimeFormat) -> Box<dyn Encoder> {
    match encoding {
        Encoding::Json => Box::new(JsonEncoder::new(time_format)),
        Encoding::Console => Box::new(ConsoleEncoder::new(time_format)),
    }
}
