//! File logging example
//!
//! Logs to the console, a plain file and a daily rotating directory at once.
//!
//! Run with: cargo run --example file_logging

use rust_log_pipeline::prelude::*;
use rust_log_pipeline::warn;

fn main() -> Result<()> {
    println!("=== Rust Log Pipeline - File Logging Example ===\n");

    let logger = Logger::new("file-demo");
    logger.add_channel(ConsoleChannel::new().with_level(LogLevel::Info));
    logger.add_channel(FileChannel::new("application.log"));
    logger.add_channel(RotatingFileChannel::new("logs").with_max_days(7));

    println!("1. Logging to console and files:");
    logger.info("Application started");
    logger.debug("Loading configuration...");
    logger.info("Configuration loaded successfully");
    logger.warn("Using default settings for some options");
    logger.error("Failed to load optional plugin");

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        logger.info(format!("Processing item {}/5", i));
        if i == 3 {
            warn!(logger, "Item {} took longer than expected", i);
        }
    }

    logger.flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' and 'logs/' for the full log output");
    Ok(())
}
