//! Basic usage: console logging, chained fields, and the global logger.
//!
//! Run with: cargo run --example basic_usage

use logpipe::field_map;
use logpipe::prelude::*;
use logpipe::{infof, warnf};

fn main() {
    // A standalone logger with a console handler.
    let logger = Logger::builder()
        .name("demo")
        .report_caller(true)
        .handler(ConsoleHandler::new(Level::Debug))
        .build();

    logger.info("service started");
    logger.debug("config loaded");
    logger.notice("cache warmed");

    // Structured fields travel with the record.
    logger
        .with_fields(field_map! { "user" => "alice", "attempt" => 2 })
        .warn("login throttled");

    // Data payloads render separately from fields.
    logger
        .with_data(field_map! { "orderId" => 8231, "total" => 19.90 })
        .info("order placed");

    // printf-style macros.
    infof!(logger, "processed {} items in {}ms", 120, 45);
    warnf!(logger, "queue depth {} exceeds soft limit", 512);

    // The process-wide default logger works without any setup.
    logpipe::global::info("hello from the default logger");
    logpipe::global::with_fields(field_map! { "k" => "v" }).info("chained on the default");

    logger.flush_all().expect("flush");
}
