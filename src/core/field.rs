//! Structured field values carried by a record
//!
//! `FieldValue` is the value side of the `data`, `fields` and `extra`
//! mappings on a record. Maps are `BTreeMap`-backed so the same record
//! always renders to the same bytes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ordered string-keyed mapping used throughout the pipeline.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Null,
    Map(FieldMap),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Uint(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
            FieldValue::Map(m) => write!(f, "{}", format_map(m)),
        }
    }
}

impl FieldValue {
    /// Convert to `serde_json::Value`, recursing into nested maps.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Uint(u) => serde_json::Value::Number((*u).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Map(m) => serde_json::Value::Object(map_to_json(m)),
        }
    }
}

/// Render a field map as a deterministic inline encoding: `{k:v,k2:v2}`
/// in key order. The empty map renders as the empty string.
#[must_use]
pub fn format_map(map: &FieldMap) -> String {
    if map.is_empty() {
        return String::new();
    }
    let inner = map
        .iter()
        .map(|(k, v)| format!("{}:{}", k, v))
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{}}}", inner)
}

/// Convert a field map into a JSON object, recursing into nested maps.
#[must_use]
pub fn map_to_json(map: &FieldMap) -> serde_json::Map<String, serde_json::Value> {
    map.iter()
        .map(|(k, v)| (k.clone(), v.to_json_value()))
        .collect()
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        FieldValue::Uint(u)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<FieldMap> for FieldValue {
    fn from(m: FieldMap) -> Self {
        FieldValue::Map(m)
    }
}

/// Build a `FieldMap` from key-value pairs.
///
/// # Examples
///
/// ```
/// use logpipe::field_map;
///
/// let m = field_map! { "user" => "alice", "attempts" => 3 };
/// assert_eq!(m.len(), 2);
/// ```
#[macro_export]
macro_rules! field_map {
    () => { $crate::core::FieldMap::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut m = $crate::core::FieldMap::new();
        $( m.insert($key.to_string(), $crate::core::FieldValue::from($value)); )+
        m
    }};
}
