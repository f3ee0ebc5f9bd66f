//! Global facade behavior: forwarding, fields, trace context, re-initialization.

use std::time::Duration;

use chrono::{DateTime, Utc};
use logfacade::context::{PARENT_SPAN_ID, SPAN_ID, SPAN_NAME, TRACE_ID};
use logfacade::{field, Level, LoggerConfig, RequestContext};
use serde::Serialize;
use serde_json::json;

mod common;

#[derive(Serialize)]
struct People {
    name: String,
    age: u32,
}

#[test]
fn test_leveled_functions_forward() {
    let _serial = common::serial();
    let buffer = common::capture_global(common::json_config());

    logfacade::debug("msg", &[field::string("key", "this is debug")]);
    logfacade::info("msg", &[field::string("key", "this is info")]);
    logfacade::warn("msg", &[field::string("key", "this is warn")]);
    logfacade::error("msg", &[field::string("key", "this is error")]);

    let recs = common::records(&buffer);
    let levels: Vec<&str> = recs.iter().map(|r| r["level"].as_str().unwrap()).collect();
    assert_eq!(levels, ["debug", "info", "warn", "error"]);
    assert_eq!(recs[3]["key"], "this is error");
}

#[test]
fn test_caller_points_at_test_file() {
    let _serial = common::serial();
    let buffer = common::capture_global(common::json_config());

    let line = line!() + 1;
    logfacade::info("where", &[]);
    logfacade::infof!("formatted {}", "where");

    let recs = common::records(&buffer);
    assert_eq!(recs[0]["caller"], format!("tests/global_logger.rs:{line}"));
    assert_eq!(recs[1]["caller"], format!("tests/global_logger.rs:{}", line + 1));
}

#[test]
fn test_formatted_macros() {
    let _serial = common::serial();
    let buffer = common::capture_global(LoggerConfig {
        level: Level::Info,
        ..common::json_config()
    });

    logfacade::debugf!("hidden {}", 0);
    logfacade::infof!("{} + {} = {}", 1, 2, 3);
    logfacade::warnf!("warn {:?}", "x");
    logfacade::errorf!("error {}", true);

    let recs = common::records(&buffer);
    let msgs: Vec<&str> = recs.iter().map(|r| r["msg"].as_str().unwrap()).collect();
    assert_eq!(msgs, ["1 + 2 = 3", "warn \"x\"", "error true"]);
    assert!(recs.iter().all(|r| r.as_object().unwrap().len() == 4));
}

#[test]
fn test_typed_fields_serialize_naturally() {
    let _serial = common::serial();
    let buffer = common::capture_global(common::json_config());

    let at: DateTime<Utc> = "2024-05-06T07:08:09.010Z".parse().unwrap();
    let failure = std::io::Error::new(std::io::ErrorKind::NotFound, "missing config");
    let addr: std::net::SocketAddr = "10.0.0.1:443".parse().unwrap();
    let people = vec![
        People { name: "Alice".into(), age: 11 },
        People { name: "Bob".into(), age: 12 },
    ];

    logfacade::info(
        "typed",
        &[
            field::int("int", -7),
            field::int64("int64", 1 << 40),
            field::uint("uint", 7),
            field::uint64("uint64", u64::MAX),
            field::uintptr("uintptr", 0x1000),
            field::float64("float64", 2.25),
            field::bool("bool", false),
            field::string("string", "hello"),
            field::stringer("stringer", &addr),
            field::time("time", at),
            field::duration("duration", Duration::from_millis(250)),
            field::err(&failure),
            field::any("any", &people),
        ],
    );

    let rec = &common::records(&buffer)[0];
    assert_eq!(rec["int"], -7);
    assert_eq!(rec["int64"], 1i64 << 40);
    assert_eq!(rec["uint"], 7);
    assert_eq!(rec["uint64"], u64::MAX);
    assert_eq!(rec["uintptr"], 0x1000);
    assert_eq!(rec["float64"], 2.25);
    assert_eq!(rec["bool"], false);
    assert_eq!(rec["string"], "hello");
    assert_eq!(rec["stringer"], "10.0.0.1:443");
    assert_eq!(rec["duration"], 0.25);
    assert_eq!(rec["error"], "missing config");
    assert_eq!(rec["any"], json!([{"name": "Alice", "age": 11}, {"name": "Bob", "age": 12}]));

    let time = rec["time"].as_str().unwrap();
    let parsed = chrono::NaiveDateTime::parse_from_str(time, "%Y-%m-%d %H:%M:%S%.3f").unwrap();
    assert_eq!(parsed.and_local_timezone(chrono::Local).single().unwrap().with_timezone(&Utc), at);
}

#[test]
fn test_with_context_trace_id_only() {
    let _serial = common::serial();
    let buffer = common::capture_global(common::json_config());

    let ctx = RequestContext::new().with_value(TRACE_ID, "t1");
    logfacade::with_context(Some(&ctx)).info("traced", &[]);

    let rec = &common::records(&buffer)[0];
    assert_eq!(rec["context"], json!({"X-B3-TraceId": "t1"}));
}

#[test]
fn test_with_context_all_keys_in_order() {
    let _serial = common::serial();
    let buffer = common::capture_global(common::json_config());

    let ctx = RequestContext::new()
        .with_value(TRACE_ID, "123456")
        .with_value(SPAN_ID, "abcdef")
        .with_value(PARENT_SPAN_ID, "1a2b3c")
        .with_value(SPAN_NAME, "logger test")
        .with_value("X-B3-Sampled", "1");
    logfacade::with_context(Some(&ctx)).debug("this is debug", &[field::int("n", 1)]);

    let rec = &common::records(&buffer)[0];
    let context = rec["context"].as_object().unwrap();
    let keys: Vec<&str> = context.keys().map(String::as_str).collect();
    assert_eq!(keys, ["X-B3-TraceId", "X-B3-SpanId", "X-B3-ParentSpanId", "X-Span-Name"]);
    assert_eq!(rec["n"], 1);
}

#[test]
fn test_with_context_absent() {
    let _serial = common::serial();
    let buffer = common::capture_global(common::json_config());

    logfacade::with_context(None).info("no context", &[]);
    let unrelated = RequestContext::new().with_value("user", "42");
    logfacade::with_context(Some(&unrelated)).info("no keys", &[]);

    for rec in common::records(&buffer) {
        assert!(rec.get("context").is_none(), "{rec}");
    }
}

#[test]
fn test_with_fields_binds() {
    let _serial = common::serial();
    let buffer = common::capture_global(common::json_config());

    let scoped = logfacade::with_fields(&[field::int("height", 170)]);
    scoped.debug("msg", &[field::any("object", &People { name: "Alice".into(), age: 11 })]);
    logfacade::debug("unscoped", &[]);

    let recs = common::records(&buffer);
    assert_eq!(recs[0]["height"], 170);
    assert_eq!(recs[0]["object"]["name"], "Alice");
    assert!(recs[1].get("height").is_none());
}

#[test]
fn test_last_initialization_wins() {
    let _serial = common::serial();
    let first = common::capture_global(common::json_config());
    let second = common::capture_global(common::json_config());

    logfacade::info("after swap", &[]);

    assert!(first.lines().is_empty());
    assert_eq!(common::records(&second)[0]["msg"], "after swap");
}

#[test]
fn test_initialization_is_announced() {
    let _serial = common::serial();
    let buffer = logfacade::sink::BufferWriter::new();
    let config = LoggerConfig {
        level: Level::Info,
        ..common::json_config()
    };
    let logger = logfacade::Logger::builder(config).with_writer(buffer.clone()).build().unwrap();
    logfacade::set_global(logger);

    let rec = &common::records(&buffer)[0];
    assert_eq!(rec["level"], "info");
    assert_eq!(rec["msg"], "logger initialized");
    assert_eq!(rec["save_to_file"], false);
    assert_eq!(rec["log_level"], "info");
    assert_eq!(rec["encoding"], "json");
    assert!(rec.get("file_path").is_none());
}

#[test]
fn test_announcement_respects_level() {
    let _serial = common::serial();
    let buffer = logfacade::sink::BufferWriter::new();
    let config = LoggerConfig {
        level: Level::Warn,
        ..common::json_config()
    };
    let logger = logfacade::Logger::builder(config).with_writer(buffer.clone()).build().unwrap();
    logfacade::set_global(logger);

    assert!(buffer.lines().is_empty());
}

#[test]
fn test_panic_logs_then_unwinds() {
    let _serial = common::serial();
    let buffer = common::capture_global(common::json_config());

    let result = std::panic::catch_unwind(|| {
        logfacade::panicf!("bad state {}", 42);
    });

    assert!(result.is_err());
    let rec = &common::records(&buffer)[0];
    assert_eq!(rec["level"], "panic");
    assert_eq!(rec["msg"], "bad state 42");
}
