//! Processor contract
//!
//! Processors mutate a record in place before formatting, in registration
//! order. Enrichment is best-effort: a processor has no error return and
//! must never fail the log call.

use crate::core::record::Record;

pub trait Processor: Send + Sync {
    fn process(&self, record: &mut Record);
}

impl<F> Processor for F
where
    F: Fn(&mut Record) + Send + Sync,
{
    fn process(&self, record: &mut Record) {
        self(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::level::Level;

    #[test]
    fn test_closure_processor() {
        let p = |r: &mut Record| r.add_field("tag", "v1");
        let mut record = Record::new(Level::Info, "m");
        p.process(&mut record);
        assert!(record.fields.contains_key("tag"));
    }
}
