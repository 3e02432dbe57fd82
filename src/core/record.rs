//! Log record structure
//!
//! One `Record` is built per emitted event, passed by reference through
//! the processors and then offered to every handler. Records are never
//! pooled or reused: each handler gets an independent view of one event.

use crate::core::field::{FieldMap, FieldValue};
use crate::core::level::Level;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default channel label for records that do not set one.
pub const DEFAULT_CHANNEL: &str = "application";

/// Call-site information, captured at emission only when the logger's
/// caller reporting is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub file: String,
    pub line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

impl Caller {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
            function: None,
        }
    }

    /// Compact `file:line` rendering used by the formatters.
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub level: Level,
    /// Captured at emission, not at formatting.
    pub time: DateTime<Utc>,
    /// Free-form grouping label, defaults to "application".
    pub channel: String,
    pub message: String,
    /// Caller-supplied payload mapping (`with_data`).
    pub data: FieldMap,
    /// Caller- and processor-supplied fields (`with_fields`, `add_field`).
    pub fields: FieldMap,
    /// Processor-contributed metadata, kept separate from user fields.
    pub extra: FieldMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller: Option<Caller>,
}

impl Record {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            time: Utc::now(),
            channel: DEFAULT_CHANNEL.to_string(),
            message: message.into(),
            data: FieldMap::new(),
            fields: FieldMap::new(),
            extra: FieldMap::new(),
            caller: None,
        }
    }

    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: FieldMap) -> Self {
        self.data = data;
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: FieldMap) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn with_caller(mut self, caller: Caller) -> Self {
        self.caller = Some(caller);
        self
    }

    /// Add a field. This is the processor-facing enrichment hook.
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
    }

    /// Add processor metadata, kept separable from user fields so the
    /// structured formatter can serialize them under their own key.
    pub fn set_extra<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.extra.insert(key.into(), value.into());
    }
}
