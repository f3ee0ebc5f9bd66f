//! Timestamp formats.

use chrono::{DateTime, Local, TimeZone};

/// Timestamp layout used for `ts` and for `time` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    /// `2006-01-02 15:04:05.000`, local time.
    Console,
    /// `2006-01-02T15:04:05.000+0800`, local time with offset.
    Iso8601,
}

impl TimeFormat {
    fn pattern(&self) -> &'static str {
        match self {
            TimeFormat::Console => "%Y-%m-%d %H:%M:%S%.3f",
            TimeFormat::Iso8601 => "%Y-%m-%dT%H:%M:%S%.3f%z",
        }
    }

    pub fn format<Tz: TimeZone>(&self, t: &DateTime<Tz>) -> String {
        t.with_timezone(&Local).format(self.pattern()).to_string()
    }
}
