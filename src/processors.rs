//! Built-in record processors
//!
//! Processors enrich a record in place before formatting. They are
//! best-effort: a processor that cannot obtain its value contributes
//! nothing rather than failing the log call.

use crate::core::processor::Processor;
use crate::core::record::Record;

/// Adds the machine hostname as a top-level `hostname` field.
///
/// The hostname is looked up once at construction and reused for every
/// record.
pub struct AddHostname {
    hostname: Option<String>,
}

impl AddHostname {
    #[must_use]
    pub fn new() -> Self {
        let hostname = hostname::get()
            .ok()
            .map(|h| h.to_string_lossy().into_owned());
        Self { hostname }
    }
}

impl Default for AddHostname {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for AddHostname {
    fn process(&self, record: &mut Record) {
        if let Some(name) = &self.hostname {
            record.add_field("hostname", name.as_str());
        }
    }
}

/// Adds a fresh ULID under the configured field key, for request or
/// event correlation.
pub struct AddUniqueId {
    key: String,
}

impl AddUniqueId {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Processor for AddUniqueId {
    fn process(&self, record: &mut Record) {
        record.add_field(self.key.clone(), ulid::Ulid::new().to_string());
    }
}

/// Records the process resident-set size in bytes as `memoryUsage`
/// extra metadata. Linux only; contributes nothing elsewhere or when
/// the proc file cannot be read.
pub struct MemoryUsage;

impl Processor for MemoryUsage {
    fn process(&self, record: &mut Record) {
        if let Some(bytes) = resident_bytes() {
            record.set_extra("memoryUsage", bytes);
        }
    }
}

#[cfg(target_os = "linux")]
fn resident_bytes() -> Option<u64> {
    // Second field of /proc/self/statm is resident pages.
    let statm = std::fs::read_to_string("/proc/self/statm").ok()?;
    let pages: u64 = statm.split_whitespace().nth(1)?.parse().ok()?;
    Some(pages * 4096)
}

#[cfg(not(target_os = "linux"))]
fn resident_bytes() -> Option<u64> {
    None
}
