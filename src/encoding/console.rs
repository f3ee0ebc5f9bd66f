//! Human-readable console lines.
//!
//! Layout: `ts<TAB>level<TAB>caller<TAB>msg[<TAB>{fields}]`, with the stack
//! trace, when present, on the following lines.

use std::io::{self, Write};

use serde_json::Map;

use super::{Encoder, Record, TimeFormat};

#[derive(Debug, Clone, Copy)]
pub struct ConsoleEncoder {
    time_format: TimeFormat,
}

impl ConsoleEncoder {
    pub fn new(time_format: TimeFormat) -> Self {
        Self { time_format }
    }
}

impl Encoder for ConsoleEncoder {
    fn encode(&self, record: &Record<'_>, buf: &mut Vec<u8>) -> io::Result<()> {
        write!(buf, "{}\t{}", self.time_format.format(&record.time), record.level)?;
        if let Some(caller) = &record.caller {
            write!(buf, "\t{}", caller.short())?;
        }
        write!(buf, "\t{}", record.message)?;

        let mut fields = Map::new();
        for field in record.all_fields() {
            fields.insert(field.key().to_string(), field.value().to_json(self.time_format));
        }
        if !fields.is_empty() {
            buf.push(b'\t');
            serde_json::to_writer(&mut *buf, &fields)?;
        }
        buf.push(b'\n');

        if let Some(stack) = &record.stacktrace {
            buf.extend_from_slice(stack.trim_end().as_bytes());
            buf.push(b'\n');
        }
        Ok(())
    }
}
