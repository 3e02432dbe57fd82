//! File logging with JSON output, buffering, and processors.
//!
//! Run with: cargo run --example file_logging

use logpipe::field_map;
use logpipe::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    let path = std::env::temp_dir().join("logpipe_demo.log");

    let file = FileHandler::new(&path, Level::Info)?
        .with_formatter(Arc::new(JsonFormatter::new().append_field("caller")));

    // Batch writes: flush every 50 records or on explicit flush.
    let logger = Logger::builder()
        .name("file-demo")
        .report_caller(true)
        .handler(BufferedHandler::new(file).with_flush_interval(50))
        .processor(AddHostname::new())
        .processor(AddUniqueId::new("requestId"))
        .build();

    for i in 0..10 {
        logger
            .with_fields(field_map! { "iteration" => i })
            .info("work item processed");
    }
    logger.error("simulated failure");

    logger.flush_all()?;
    logger.close_all()?;

    println!("wrote log records to {}", path.display());
    Ok(())
}
