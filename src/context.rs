//! Request-scoped trace correlation.
//!
//! # Responsibilities
//! - Carry request-scoped values ([`RequestContext`])
//! - Extract the B3 correlation keys into a single `context` field
//! - Originate new traces and child spans
//!
//! # Design Decisions
//! - Extraction never fails: absent keys are omitted, never null-filled
//! - Keys are read in a fixed order and the resulting map keeps that order
//! - Lookup is a trait so hosts can pass their own header or extension maps

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::field::{Field, FieldValue};

pub const TRACE_ID: &str = "X-B3-TraceId";
pub const SPAN_ID: &str = "X-B3-SpanId";
pub const PARENT_SPAN_ID: &str = "X-B3-ParentSpanId";
pub const SPAN_NAME: &str = "X-Span-Name";

/// Correlation keys, in extraction order.
pub const TRACE_KEYS: [&str; 4] = [TRACE_ID, SPAN_ID, PARENT_SPAN_ID, SPAN_NAME];

/// Name of the field holding the extracted keys.
pub const CONTEXT_FIELD: &str = "context";

/// Read access to request-scoped string values.
pub trait ContextLookup {
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl ContextLookup for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl ContextLookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Immutable chain of key/value pairs.
///
/// `with_value` returns a child that shadows earlier values for the same key;
/// the parent is left untouched and clones are cheap.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    head: Option<Arc<Entry>>,
}

#[derive(Debug)]
struct Entry {
    key: String,
    value: String,
    parent: Option<Arc<Entry>>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            head: Some(Arc::new(Entry {
                key: key.into(),
                value: value.into(),
                parent: self.head.clone(),
            })),
        }
    }

    /// Start a new trace: fresh 128-bit trace id and 64-bit span id.
    pub fn with_new_trace(&self) -> Self {
        self.with_value(TRACE_ID, Uuid::new_v4().simple().to_string())
            .with_value(SPAN_ID, new_span_id())
    }

    /// Derive a child span of the current one, keeping the trace id.
    ///
    /// Starts a new trace first if this context has none.
    pub fn child_span(&self, name: impl Into<String>) -> Self {
        let base = if self.lookup(TRACE_ID).is_some() {
            self.clone()
        } else {
            self.with_value(TRACE_ID, Uuid::new_v4().simple().to_string())
        };
        let base = match self.lookup(SPAN_ID) {
            Some(parent) => base.with_value(PARENT_SPAN_ID, parent),
            None => base,
        };
        base.with_value(SPAN_ID, new_span_id()).with_value(SPAN_NAME, name)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.lookup(key)
    }
}

impl ContextLookup for RequestContext {
    fn lookup(&self, key: &str) -> Option<&str> {
        let mut entry = self.head.as_deref();
        while let Some(e) = entry {
            if e.key == key {
                return Some(&e.value);
            }
            entry = e.parent.as_deref();
        }
        None
    }
}

fn new_span_id() -> String {
    format!("{:016x}", Uuid::new_v4().as_u64_pair().0)
}

/// Collect the correlation keys present in `ctx` into one `context` field.
///
/// Returns `None` when there is no context or none of the keys is set.
pub fn trace_field(ctx: Option<&dyn ContextLookup>) -> Option<Field> {
    let ctx = ctx?;
    let mut found = Map::new();
    for key in TRACE_KEYS {
        if let Some(value) = ctx.lookup(key) {
            found.insert(key.to_string(), Value::from(value));
        }
    }

    if found.is_empty() {
        None
    } else {
        Some(Field::new(CONTEXT_FIELD, FieldValue::Any(Value::Object(found))))
    }
}
