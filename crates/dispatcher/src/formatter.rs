//! Message rendering
//!
//! Renders a record the way the host displays structured records on disk:
//!
//! ```text
//! ["timestamp": 1700000000.000000000, {"level"="error", "msg"="disk full", "to"="alice"}]
//! ```
//!
//! Field names are sorted so identical records always render identically.
//! Quotes and separators inside keys or values are passed through verbatim.

use chrono::{DateTime, Utc};

use contracts::{FieldValue, Record};

/// Render one record as a single-line message
pub fn format_message(timestamp: DateTime<Utc>, record: &Record) -> String {
    let mut out = String::with_capacity(64 + record.len() * 24);
    out.push_str("[\"timestamp\": ");
    out.push_str(&timestamp.timestamp().to_string());
    out.push_str(".000000000, ");
    write_fields(&mut out, record.iter());
    out.push(']');
    out
}

/// Write `{"k"="v", ...}` with keys in byte order
fn write_fields<'a>(out: &mut String, fields: impl Iterator<Item = (&'a str, &'a FieldValue)>) {
    let mut fields: Vec<_> = fields.collect();
    fields.sort_unstable_by(|a, b| a.0.cmp(b.0));

    out.push('{');
    for (i, (key, value)) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('"');
        out.push_str(key);
        out.push_str("\"=\"");
        write_value(out, value);
        out.push('"');
    }
    out.push('}');
}

fn write_value(out: &mut String, value: &FieldValue) {
    match value {
        FieldValue::Text(s) => out.push_str(s),
        FieldValue::Bytes(b) => out.push_str(&String::from_utf8_lossy(b)),
        FieldValue::Integer(n) => out.push_str(&n.to_string()),
        FieldValue::Unsigned(n) => out.push_str(&n.to_string()),
        FieldValue::Float(n) => out.push_str(&n.to_string()),
        FieldValue::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        FieldValue::Nil => out.push_str("nil"),
        FieldValue::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, item);
            }
            out.push(']');
        }
        FieldValue::Map(map) => write_fields(out, map.iter().map(|(k, v)| (k.as_str(), v))),
    }
}
