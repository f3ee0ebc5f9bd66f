//! Output sinks.
//!
//! # Responsibilities
//! - Open the configured target (stdout or an append-mode file)
//! - Accept any `tracing_subscriber` [`MakeWriter`] for embedding and tests
//! - Write each encoded record with a single `write_all`
//!
//! # Design Decisions
//! - File output goes through `tracing-appender` with rotation disabled, so
//!   the file name is exactly the configured one and parent directories are
//!   created on open
//! - Write failures go to stderr and are never returned to the caller

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriter};

use crate::config::{ConfigError, SinkTarget};

/// Destination of encoded records.
pub struct Sink {
    writer: BoxMakeWriter,
    description: String,
}

impl Sink {
    /// Open the configured target.
    pub fn open(target: &SinkTarget) -> Result<Self, ConfigError> {
        match target {
            SinkTarget::Stdout => Ok(Self::stdout()),
            SinkTarget::File(path) => Self::file(path),
        }
    }

    pub fn stdout() -> Self {
        Self {
            writer: BoxMakeWriter::new(io::stdout),
            description: "stdout".to_string(),
        }
    }

    /// Append to `path`, creating it and its parent directories if needed.
    pub fn file(path: &Path) -> Result<Self, ConfigError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ConfigError::InvalidPath(path.to_path_buf()))?;
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(file_name)
            .build(&directory)
            .map_err(|source| ConfigError::OpenSink {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            writer: BoxMakeWriter::new(appender),
            description: path.display().to_string(),
        })
    }

    /// Wrap any writer factory, e.g. a [`BufferWriter`] in tests.
    pub fn from_writer<W>(writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        Self {
            writer: BoxMakeWriter::new(writer),
            description: "custom".to_string(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn write_record(&self, record: &[u8]) {
        let mut writer = self.writer.make_writer();
        if let Err(e) = writer.write_all(record) {
            eprintln!("logfacade: write to {} failed: {}", self.description, e);
        }
    }

    pub fn flush(&self) {
        if let Err(e) = self.writer.make_writer().flush() {
            eprintln!("logfacade: flush of {} failed: {}", self.description, e);
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").field("description", &self.description).finish()
    }
}

/// In-memory writer whose clones share one buffer.
///
/// Useful for asserting on output or for embedding the logger into a host
/// that collects records itself.
#[derive(Clone, Debug, Default)]
pub struct BufferWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl BufferWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Non-empty lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn clear(&self) {
        self.buf.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl Write for BufferWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
