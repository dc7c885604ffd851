//! Asynchronous logging example
//!
//! Producers on several threads hand events to a background writer.
//!
//! Run with: cargo run --example async_logging

use rust_log_pipeline::info;
use rust_log_pipeline::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

fn main() -> Result<()> {
    println!("=== Rust Log Pipeline - Async Logging Example ===\n");

    let logger = Arc::new(
        Logger::builder()
            .name("async-demo")
            .channel(ConsoleChannel::new().with_detail(false))
            .async_mode(true)
            .build()?,
    );

    let start = Instant::now();
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..5 {
                    info!(logger, "worker {} message {}", worker, i);
                }
            })
        })
        .collect();
    for handle in handles {
        let _ = handle.join();
    }
    let produced = start.elapsed();

    // Drains every pending event before returning
    logger.shutdown();

    println!("\nProducers finished in {:?}", produced);
    println!("=== Example completed successfully! ===");
    Ok(())
}
