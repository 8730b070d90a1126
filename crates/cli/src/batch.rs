//! Batch files: one `[timestamp, record]` JSON array per line.
//!
//! Timestamp shapes:
//! - integer            -> Unix seconds
//! - float              -> event time (seconds + nanoseconds)
//! - `[secs, nanos]`    -> event time
//! - `[ts, {metadata}]` -> the inner `ts`, metadata ignored
//! - anything else      -> unrecognized (dispatcher falls back to now)

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use contracts::{FieldValue, LogEvent, RawTimestamp, Record};

use crate::error::{CliError, Result};

/// Read a batch file into log events, in file order
pub fn read_batch(path: &Path) -> Result<Vec<LogEvent>> {
    let content = fs::read_to_string(path)?;
    parse_batch(&content, &path.display().to_string())
}

/// Parse batch content; `origin` names the source in errors
pub fn parse_batch(content: &str, origin: &str) -> Result<Vec<LogEvent>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_line(line).map_err(|msg| CliError::batch_parse(origin, idx + 1, msg)))
        .collect()
}

fn parse_line(line: &str) -> std::result::Result<LogEvent, String> {
    let value: Value = serde_json::from_str(line).map_err(|e| e.to_string())?;
    let Value::Array(mut items) = value else {
        return Err("expected a [timestamp, record] array".to_string());
    };
    if items.len() != 2 {
        return Err(format!("expected 2 elements, found {}", items.len()));
    }

    let record = match items.pop() {
        Some(Value::Object(map)) => Record::from(
            map.into_iter()
                .map(|(k, v)| (k, to_field_value(v)))
                .collect::<HashMap<_, _>>(),
        ),
        _ => return Err("second element must be an object".to_string()),
    };
    let timestamp = items.pop().map(|ts| to_timestamp(&ts)).unwrap_or_else(|| {
        RawTimestamp::unrecognized("missing")
    });

    Ok(LogEvent::new(timestamp, record))
}

fn to_timestamp(value: &Value) -> RawTimestamp {
    match value {
        Value::Number(n) => {
            if let Some(secs) = n.as_u64() {
                RawTimestamp::UnixSeconds(secs)
            } else if let Some(f) = n.as_f64().filter(|f| f.is_finite()) {
                let secs = f.floor();
                let nanos = ((f - secs) * 1e9).round().min(999_999_999.0) as u32;
                RawTimestamp::event_time(secs as i64, nanos)
            } else {
                RawTimestamp::unrecognized(n.to_string())
            }
        }
        Value::Array(parts) => match parts.as_slice() {
            [Value::Number(secs), Value::Number(nanos)] => {
                match (secs.as_i64(), nanos.as_u64().and_then(|n| u32::try_from(n).ok())) {
                    (Some(secs), Some(nanos)) => RawTimestamp::event_time(secs, nanos),
                    _ => RawTimestamp::unrecognized(value.to_string()),
                }
            }
            [inner, Value::Object(_)] => to_timestamp(inner),
            _ => RawTimestamp::unrecognized(value.to_string()),
        },
        other => RawTimestamp::unrecognized(other.to_string()),
    }
}

fn to_field_value(value: Value) -> FieldValue {
    match value {
        Value::String(s) => FieldValue::Text(s),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Integer(i)
            } else if let Some(u) = n.as_u64() {
                FieldValue::Unsigned(u)
            } else {
                FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::Bool(b) => FieldValue::Boolean(b),
        Value::Null => FieldValue::Nil,
        Value::Array(items) => FieldValue::Array(items.into_iter().map(to_field_value).collect()),
        Value::Object(map) => FieldValue::Map(
            map.into_iter()
                .map(|(k, v)| (k, to_field_value(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_batch_lines_in_order() {
        let content = r#"
[1700000000, {"to": "alice", "msg": "disk full"}]

[1700000001, {"to": "bob", "count": 3}]
"#;
        let events = parse_batch(content, "inline").unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].timestamp, RawTimestamp::UnixSeconds(1_700_000_000));
        assert_eq!(
            events[1].record.get("count"),
            Some(&FieldValue::Integer(3))
        );
    }

    #[test]
    fn test_timestamp_shapes() {
        let ts = |s: &str| to_timestamp(&serde_json::from_str(s).unwrap());
        assert_eq!(ts("42"), RawTimestamp::UnixSeconds(42));
        assert_eq!(ts("1.5"), RawTimestamp::event_time(1, 500_000_000));
        assert_eq!(ts("[10, 20]"), RawTimestamp::event_time(10, 20));
        assert_eq!(ts(r#"[[10, 20], {}]"#), RawTimestamp::event_time(10, 20));
        assert!(matches!(ts(r#""yesterday""#), RawTimestamp::Unrecognized(_)));
        assert!(matches!(ts("-5"), RawTimestamp::EventTime { secs: -5, nanos: 0 }));
    }

    #[test]
    fn test_nested_values() {
        let events = parse_batch(r#"[1, {"ctx": {"a": [1, null, true]}}]"#, "inline").unwrap();
        let FieldValue::Map(ctx) = events[0].record.get("ctx").unwrap() else {
            panic!("expected map");
        };
        assert_eq!(
            ctx.get("a"),
            Some(&FieldValue::Array(vec![
                FieldValue::Integer(1),
                FieldValue::Nil,
                FieldValue::Boolean(true)
            ]))
        );
    }

    #[test]
    fn test_parse_errors_name_line() {
        let err = parse_batch("[1, {}]\n{\"not\": \"array\"}", "batch.jsonl").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid batch line 2 in batch.jsonl: expected a [timestamp, record] array"
        );
        assert!(parse_batch("[1, \"x\"]", "b").is_err());
        assert!(parse_batch("[1]", "b").is_err());
    }
}
