//! One JSON object per line.

use std::io;

use serde_json::{Map, Value};

use super::{
    Encoder, Record, TimeFormat, CALLER_KEY, LEVEL_KEY, MESSAGE_KEY, STACKTRACE_KEY, TIME_KEY,
};

#[derive(Debug, Clone, Copy)]
pub struct JsonEncoder {
    time_format: TimeFormat,
}

impl JsonEncoder {
    pub fn new(time_format: TimeFormat) -> Self {
        Self { time_format }
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, record: &Record<'_>, buf: &mut Vec<u8>) -> io::Result<()> {
        let mut object = Map::new();
        object.insert(LEVEL_KEY.to_string(), Value::from(record.level.as_str()));
        object.insert(TIME_KEY.to_string(), Value::from(self.time_format.format(&record.time)));
        if let Some(caller) = &record.caller {
            object.insert(CALLER_KEY.to_string(), Value::from(caller.short()));
        }
        object.insert(MESSAGE_KEY.to_string(), Value::from(record.message));

        // Later duplicates overwrite in place.
        for field in record.all_fields() {
            object.insert(field.key().to_string(), field.value().to_json(self.time_format));
        }

        if let Some(stack) = &record.stacktrace {
            object.insert(STACKTRACE_KEY.to_string(), Value::from(stack.as_str()));
        }

        serde_json::to_writer(&mut *buf, &object)?;
        buf.push(b'\n');
        Ok(())
    }
}
