//! Record - host batch item
//!
//! Heterogeneous field values and the unordered record that carries them.

use bytes::Bytes;
use std::collections::HashMap;

use crate::RawTimestamp;

/// One field value of a log record
///
/// Mirrors the value shapes the host's batch encoding can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// UTF-8 string
    Text(String),

    /// Raw byte sequence (the host delivers most strings this way)
    Bytes(Bytes),

    /// Signed integer
    Integer(i64),

    /// Unsigned integer beyond the signed range
    Unsigned(u64),

    /// Floating point number
    Float(f64),

    /// Boolean
    Boolean(bool),

    /// Explicit nil
    Nil,

    /// Ordered sequence
    Array(Vec<FieldValue>),

    /// Nested map (unordered)
    Map(HashMap<String, FieldValue>),
}

impl FieldValue {
    /// Short type name used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Integer(_) => "integer",
            Self::Unsigned(_) => "unsigned",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Nil => "nil",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
        }
    }

    /// Borrow the value as text
    ///
    /// Succeeds for `Text` and for `Bytes` holding valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Bytes> for FieldValue {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => Self::Integer(v),
            Err(_) => Self::Unsigned(value),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Structured log record
///
/// Unordered mapping from field name to value. Iteration order is not stable;
/// anything that renders a record must sort the field names itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: HashMap<String, FieldValue>,
}

impl Record {
    /// Create empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Look up a field by name
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in storage order (unspecified)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, FieldValue>> for Record {
    fn from(fields: HashMap<String, FieldValue>) -> Self {
        Self { fields }
    }
}

/// One decoded batch item: event time plus record
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    /// Event time as delivered by the host
    pub timestamp: RawTimestamp,

    /// Field set
    pub record: Record,
}

impl LogEvent {
    /// Create a log event
    pub fn new(timestamp: RawTimestamp, record: Record) -> Self {
        Self { timestamp, record }
    }
}
