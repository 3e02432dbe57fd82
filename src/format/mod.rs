//! Formatter implementations

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::{TextFormatter, DEFAULT_TEMPLATE, NAMED_TEMPLATE};

// Re-export the contract for convenience
pub use crate::core::Formatter;
