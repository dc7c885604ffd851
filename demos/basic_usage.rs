//! Basic logger usage example
//!
//! Demonstrates synchronous logging to the console at different levels.
//!
//! Run with: cargo run --example basic_usage

use rust_log_pipeline::prelude::*;
use rust_log_pipeline::{debug, error, info, trace, warn};

fn main() -> Result<()> {
    println!("=== Rust Log Pipeline - Basic Usage Example ===\n");

    let logger = Logger::new("basic");
    logger.add_channel(ConsoleChannel::new());

    println!("1. Logging at different levels:");
    trace!(logger, "This is a trace message");
    debug!(logger, "This is a debug message");
    info!(logger, "This is an info message");
    warn!(logger, "This is a warning message");
    error!(logger, "This is an error message");

    println!("\n2. Raising the channel threshold to INFO:");
    logger.set_level(LogLevel::Info);
    logger.trace("Trace message (hidden)");
    logger.debug("Debug message (hidden)");
    logger.info("Info message (visible)");
    logger.warn("Warning message (visible)");

    println!("\n3. Without the detail prefix:");
    logger.set_detail(false);
    info!(logger, "{} + {} = {}", 2, 2, 2 + 2);

    println!("\n4. Through the process-wide logger:");
    Logger::global().add_channel(ConsoleChannel::new().with_detail(false));
    info!("Hello from {}", Logger::global().name());

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
