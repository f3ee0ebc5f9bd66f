//! `tracing` → logger bridge.
//!
//! # Responsibilities
//! - Forward `tracing` events from the application and its dependencies to
//!   the facade logger
//! - Map `tracing` levels and recorded values onto levels and typed fields
//!
//! # Design Decisions
//! - `TRACE` events are emitted at `debug`; the facade has no lower level
//! - The event's `message` becomes the record message; `target` is kept as a
//!   field so the origin of bridged records stays visible
//! - The facade itself never emits `tracing` events, so forwarding cannot loop

use std::fmt;

use tracing::field::{Field as TracingField, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::{ConfigError, Level};
use crate::encoding::Caller;
use crate::field::{self, Field, FieldValue};
use crate::logger::{global, Logger};

/// Field name `tracing` uses for the formatted message.
const MESSAGE_FIELD: &str = "message";
/// Extra field carrying the event target.
pub const TARGET_FIELD: &str = "target";

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::INFO => Level::Info,
            _ => Level::Debug,
        }
    }
}

/// Layer forwarding every event to a facade logger.
#[derive(Debug, Clone, Default)]
pub struct FacadeLayer {
    logger: Option<Logger>,
}

impl FacadeLayer {
    /// Forward to whatever the global logger is at the time of each event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward to a fixed logger.
    pub fn with_logger(logger: Logger) -> Self {
        Self { logger: Some(logger) }
    }
}

impl<S: Subscriber> Layer<S> for FacadeLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Level::from(*metadata.level());
        let logger = match &self.logger {
            Some(logger) => logger.clone(),
            None => global::logger(),
        };
        if !logger.enabled(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        visitor.fields.push(field::string(TARGET_FIELD, metadata.target()));

        let caller = metadata
            .file()
            .zip(metadata.line())
            .map(|(file, line)| Caller::new(file, line));
        logger.emit(level, &visitor.message, &visitor.fields, caller);
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<Field>,
}

impl FieldVisitor {
    fn push(&mut self, field: &TracingField, value: FieldValue) {
        self.fields.push(Field::new(field.name(), value));
    }
}

impl Visit for FieldVisitor {
    fn record_i64(&mut self, field: &TracingField, value: i64) {
        self.push(field, FieldValue::Int(value));
    }

    fn record_u64(&mut self, field: &TracingField, value: u64) {
        self.push(field, FieldValue::Uint(value));
    }

    fn record_f64(&mut self, field: &TracingField, value: f64) {
        self.push(field, FieldValue::Float(value));
    }

    fn record_bool(&mut self, field: &TracingField, value: bool) {
        self.push(field, FieldValue::Bool(value));
    }

    fn record_str(&mut self, field: &TracingField, value: &str) {
        if field.name() == MESSAGE_FIELD {
            self.message = value.to_string();
        } else {
            self.push(field, FieldValue::String(value.to_string()));
        }
    }

    fn record_error(&mut self, field: &TracingField, value: &(dyn std::error::Error + 'static)) {
        self.push(field, FieldValue::Error(value.to_string()));
    }

    fn record_debug(&mut self, field: &TracingField, value: &dyn fmt::Debug) {
        if field.name() == MESSAGE_FIELD {
            self.message = format!("{:?}", value);
        } else {
            self.push(field, FieldValue::String(format!("{:?}", value)));
        }
    }
}

/// Install [`FacadeLayer`] as the global `tracing` subscriber.
///
/// `RUST_LOG` narrows which events reach the layer; without it every event
/// is forwarded and the facade's own level decides.
pub fn install_bridge() -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));
    let subscriber = tracing_subscriber::registry().with(filter).with(FacadeLayer::new());
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Encoding, LoggerConfig};
    use crate::sink::BufferWriter;
    use serde_json::{json, Value};

    fn bridged(level: Level) -> (tracing::Dispatch, BufferWriter) {
        let buffer = BufferWriter::new();
        let config = LoggerConfig {
            level,
            encoding: Encoding::Json,
            disable_stacktrace: true,
            ..LoggerConfig::default()
        };
        let logger = Logger::builder(config).with_writer(buffer.clone()).build().unwrap();
        let subscriber = tracing_subscriber::registry().with(FacadeLayer::with_logger(logger));
        (tracing::Dispatch::new(subscriber), buffer)
    }

    fn records(buffer: &BufferWriter) -> Vec<Value> {
        buffer.lines().iter().map(|l| serde_json::from_str(l).unwrap()).collect()
    }

    #[test]
    fn test_event_fields_are_forwarded() {
        let (dispatch, buffer) = bridged(Level::Debug);
        tracing::dispatcher::with_default(&dispatch, || {
            tracing::info!(
                target: "app::db",
                rows = 3u64,
                table = "users",
                ok = true,
                "query done"
            );
        });

        let recs = records(&buffer);
        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec["level"], "info");
        assert_eq!(rec["msg"], "query done");
        assert_eq!(rec["rows"], 3);
        assert_eq!(rec["table"], "users");
        assert_eq!(rec["ok"], true);
        assert_eq!(rec["target"], "app::db");
        assert!(rec["caller"].as_str().unwrap().starts_with("observability/bridge.rs:"));
    }

    #[test]
    fn test_levels_map_and_filter() {
        let (dispatch, buffer) = bridged(Level::Info);
        tracing::dispatcher::with_default(&dispatch, || {
            tracing::trace!("dropped");
            tracing::debug!("dropped");
            tracing::warn!("kept");
            tracing::error!(error = %"disk full", "kept");
        });

        let recs = records(&buffer);
        let levels: Vec<&Value> = recs.iter().map(|r| &r["level"]).collect();
        assert_eq!(levels, [&json!("warn"), &json!("error")]);
        assert_eq!(recs[1]["error"], "disk full");
    }

    #[test]
    fn test_level_conversion() {
        assert_eq!(Level::from(tracing::Level::TRACE), Level::Debug);
        assert_eq!(Level::from(tracing::Level::DEBUG), Level::Debug);
        assert_eq!(Level::from(tracing::Level::ERROR), Level::Error);
    }
}
