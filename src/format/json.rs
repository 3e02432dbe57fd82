//! Structured (JSON) formatter
//!
//! Serializes each record as one compact JSON object per line. The set
//! of emitted keys is a configurable ordered subset (default: channel,
//! level, datetime, message, data, extra); `caller` is opt-in. Keys can
//! be renamed through an alias map without changing internal identity.
//! Record-level `fields` are merged at the top level of the object.

use crate::core::error::Result;
use crate::core::field::map_to_json;
use crate::core::formatter::Formatter;
use crate::core::record::Record;
use crate::core::timestamp::TimestampFormat;
use std::collections::HashMap;

/// Default emitted field set.
pub const DEFAULT_FIELDS: [&str; 6] = ["channel", "level", "datetime", "message", "data", "extra"];

pub struct JsonFormatter {
    fields: Vec<String>,
    aliases: HashMap<String, String>,
    timestamp: TimestampFormat,
}

impl JsonFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: DEFAULT_FIELDS.iter().map(|s| s.to_string()).collect(),
            aliases: HashMap::new(),
            timestamp: TimestampFormat::default(),
        }
    }

    /// Replace the emitted field subset.
    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Add one field to the emitted subset (e.g. "caller").
    #[must_use]
    pub fn append_field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Rename `field` to `output_key` in the serialized object.
    #[must_use]
    pub fn alias(mut self, field: impl Into<String>, output_key: impl Into<String>) -> Self {
        self.aliases.insert(field.into(), output_key.into());
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, format: TimestampFormat) -> Self {
        self.timestamp = format;
        self
    }

    fn output_key(&self, field: &str) -> String {
        self.aliases
            .get(field)
            .cloned()
            .unwrap_or_else(|| field.to_string())
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, record: &Record) -> Result<Vec<u8>> {
        let mut obj = serde_json::Map::new();

        for field in &self.fields {
            let key = self.output_key(field);
            let value = match field.as_str() {
                "channel" => serde_json::Value::String(record.channel.clone()),
                "level" => serde_json::Value::String(record.level.as_str().to_string()),
                "datetime" => serde_json::Value::String(self.timestamp.format(&record.time)),
                "message" => serde_json::Value::String(record.message.clone()),
                "data" => serde_json::Value::Object(map_to_json(&record.data)),
                "extra" => serde_json::Value::Object(map_to_json(&record.extra)),
                "caller" => match &record.caller {
                    Some(caller) => serde_json::Value::String(caller.location()),
                    None => continue,
                },
                // Unknown configured fields are skipped.
                _ => continue,
            };
            obj.insert(key, value);
        }

        // Caller-supplied and processor-supplied fields merge at the top
        // level, aliased the same way.
        for (key, value) in &record.fields {
            obj.insert(self.output_key(key), value.to_json_value());
        }

        let mut bytes = serde_json::to_vec(&serde_json::Value::Object(obj))?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
