//! Text-template formatter
//!
//! Renders a record through a template string containing `{{name}}`
//! placeholders. Stable placeholder names: `datetime`, `channel`,
//! `level`, `message`, `data`, `fields`, `extra`, `caller`, `func`.
//! Unresolved placeholders render as the empty string.

use crate::core::error::Result;
use crate::core::field::format_map;
use crate::core::formatter::Formatter;
use crate::core::record::{Caller, Record};
use crate::core::timestamp::TimestampFormat;

#[cfg(feature = "console")]
use colored::Colorize;

/// Default output template.
pub const DEFAULT_TEMPLATE: &str =
    "[{{datetime}}] [{{channel}}] [{{level}}] [{{caller}}] {{message}} {{data}} {{extra}}\n";

/// Template with the caller's function name instead of file:line.
pub const NAMED_TEMPLATE: &str =
    "[{{datetime}}] [{{channel}}] [{{level}}] [{{func}}] {{message}} {{data}} {{extra}}\n";

pub struct TextFormatter {
    template: String,
    timestamp: TimestampFormat,
    enable_color: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            timestamp: TimestampFormat::default(),
            enable_color: false,
        }
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, format: TimestampFormat) -> Self {
        self.timestamp = format;
        self
    }

    /// Wrap the level token in ANSI color codes selected by severity.
    /// Only meaningful when the sink is a color-capable terminal.
    #[must_use]
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.enable_color = enabled;
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = template.into();
    }

    fn level_token(&self, record: &Record) -> String {
        let name = record.level.as_str();
        #[cfg(feature = "console")]
        if self.enable_color {
            return name.color(record.level.color()).to_string();
        }
        name.to_string()
    }

    fn placeholder_value(&self, name: &str, record: &Record) -> String {
        match name {
            "datetime" => self.timestamp.format(&record.time),
            "channel" => record.channel.clone(),
            "level" => self.level_token(record),
            "message" => record.message.clone(),
            "data" => format_map(&record.data),
            "fields" => format_map(&record.fields),
            "extra" => format_map(&record.extra),
            "caller" => record
                .caller
                .as_ref()
                .map(Caller::location)
                .unwrap_or_default(),
            "func" => record
                .caller
                .as_ref()
                .and_then(|c| c.function.clone())
                .unwrap_or_default(),
            // Unknown placeholders render as empty.
            _ => String::new(),
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for TextFormatter {
    fn format(&self, record: &Record) -> Result<Vec<u8>> {
        let mut out = String::with_capacity(self.template.len() + record.message.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let name = after[..end].trim();
                    out.push_str(&self.placeholder_value(name, record));
                    rest = &after[end + 2..];
                }
                None => {
                    // Unterminated placeholder passes through literally.
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);

        Ok(out.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::level::Level;
    use crate::field_map;

    fn render(f: &TextFormatter, record: &Record) -> String {
        String::from_utf8(f.format(record).expect("format")).expect("utf8")
    }

    #[test]
    fn test_default_template() {
        let f = TextFormatter::new();
        let record = Record::new(Level::Info, "hello world");
        let line = render(&f, &record);

        assert!(line.contains("[INFO]"));
        assert!(line.contains("[application]"));
        assert!(line.contains("hello world"));
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn test_unknown_placeholder_renders_empty() {
        let f = TextFormatter::new().with_template("{{level}}|{{nonsense}}|{{message}}\n");
        let record = Record::new(Level::Warn, "msg");
        assert_eq!(render(&f, &record), "WARNING||msg\n");
    }

    #[test]
    fn test_data_renders_key_sorted() {
        let f = TextFormatter::new().with_template("{{data}}");
        let record =
            Record::new(Level::Info, "m").with_data(field_map! { "b" => 2, "a" => 1 });
        assert_eq!(render(&f, &record), "{a:1,b:2}");
    }

    #[test]
    fn test_deterministic_output() {
        let f = TextFormatter::new().with_template("{{level}} {{message}} {{fields}}");
        let record =
            Record::new(Level::Debug, "m").with_fields(field_map! { "x" => 1, "y" => "z" });
        assert_eq!(render(&f, &record), render(&f, &record));
    }

    #[test]
    fn test_caller_placeholder() {
        let f = TextFormatter::new().with_template("{{caller}}");
        let mut record = Record::new(Level::Info, "m");
        assert_eq!(render(&f, &record), "");

        record.caller = Some(Caller::new("src/app.rs", 7));
        assert_eq!(render(&f, &record), "src/app.rs:7");
    }

    #[test]
    fn test_unterminated_placeholder_passes_through() {
        let f = TextFormatter::new().with_template("{{message}} {{oops");
        let record = Record::new(Level::Info, "m");
        assert_eq!(render(&f, &record), "m {{oops");
    }
}
