//! Typed key/value fields attached to a single record.
//!
//! # Responsibilities
//! - Define [`Field`] and its tagged [`FieldValue`]
//! - Provide one constructor per semantic type
//! - Render values into JSON according to the logger's time format
//!
//! # Design Decisions
//! - Structured values (`any`) are resolved through `serde::Serialize` at the
//!   call site, so records never hold borrowed or reflective data
//! - Display-based values (`stringer`, `err`) are rendered eagerly
//! - A failed `any` serialization becomes `"<key>Error": "<reason>"`

use std::fmt::Display;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Number, Value};

use crate::encoding::TimeFormat;

/// Key used by [`err`].
pub const ERROR_KEY: &str = "error";

/// A single typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Uint(u64),
    Uintptr(usize),
    Float(f64),
    Bool(bool),
    String(String),
    Stringer(String),
    Time(DateTime<Utc>),
    Duration(Duration),
    Error(String),
    Any(Value),
}

impl FieldValue {
    /// JSON form of the value as written into records.
    ///
    /// Durations are float seconds, non-finite floats are strings.
    pub fn to_json(&self, time_format: TimeFormat) -> Value {
        match self {
            FieldValue::Int(v) => Value::from(*v),
            FieldValue::Uint(v) => Value::from(*v),
            FieldValue::Uintptr(v) => Value::from(*v),
            FieldValue::Float(v) => float_to_json(*v),
            FieldValue::Bool(v) => Value::Bool(*v),
            FieldValue::String(v) | FieldValue::Stringer(v) | FieldValue::Error(v) => {
                Value::String(v.clone())
            }
            FieldValue::Time(v) => Value::String(time_format.format(v)),
            FieldValue::Duration(v) => float_to_json(v.as_secs_f64()),
            FieldValue::Any(v) => v.clone(),
        }
    }
}

fn float_to_json(v: f64) -> Value {
    match Number::from_f64(v) {
        Some(n) => Value::Number(n),
        None if v.is_nan() => Value::String("NaN".to_string()),
        None if v.is_sign_positive() => Value::String("+Inf".to_string()),
        None => Value::String("-Inf".to_string()),
    }
}

/// An immutable key/value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    key: String,
    value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<String>, value: FieldValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }
}

pub fn int(key: impl Into<String>, val: isize) -> Field {
    Field::new(key, FieldValue::Int(val as i64))
}

pub fn int64(key: impl Into<String>, val: i64) -> Field {
    Field::new(key, FieldValue::Int(val))
}

pub fn uint(key: impl Into<String>, val: usize) -> Field {
    Field::new(key, FieldValue::Uint(val as u64))
}

pub fn uint64(key: impl Into<String>, val: u64) -> Field {
    Field::new(key, FieldValue::Uint(val))
}

/// Address-sized unsigned value, e.g. a pointer cast with `as usize`.
pub fn uintptr(key: impl Into<String>, val: usize) -> Field {
    Field::new(key, FieldValue::Uintptr(val))
}

pub fn float64(key: impl Into<String>, val: f64) -> Field {
    Field::new(key, FieldValue::Float(val))
}

pub fn bool(key: impl Into<String>, val: bool) -> Field {
    Field::new(key, FieldValue::Bool(val))
}

pub fn string(key: impl Into<String>, val: impl Into<String>) -> Field {
    Field::new(key, FieldValue::String(val.into()))
}

/// Captures the `Display` output of `val`.
pub fn stringer<T: Display + ?Sized>(key: impl Into<String>, val: &T) -> Field {
    Field::new(key, FieldValue::Stringer(val.to_string()))
}

/// Accepts `DateTime<Utc>`, `DateTime<Local>` or `SystemTime`.
pub fn time(key: impl Into<String>, val: impl Into<DateTime<Utc>>) -> Field {
    Field::new(key, FieldValue::Time(val.into()))
}

pub fn duration(key: impl Into<String>, val: Duration) -> Field {
    Field::new(key, FieldValue::Duration(val))
}

/// Error message under the fixed `"error"` key.
pub fn err<E: std::error::Error + ?Sized>(error: &E) -> Field {
    Field::new(ERROR_KEY, FieldValue::Error(error.to_string()))
}

/// Structured value: objects, sequences, mappings or anything else `Serialize`.
pub fn any<T: Serialize + ?Sized>(key: impl Into<String>, val: &T) -> Field {
    let key = key.into();
    match serde_json::to_value(val) {
        Ok(value) => Field::new(key, FieldValue::Any(value)),
        Err(e) => Field::new(format!("{key}Error"), FieldValue::Error(e.to_string())),
    }
}
