//! Worker pool example
//!
//! Runs tasks on a fixed pool, jumps the queue with a priority task and
//! shows a panicking task being reported through the logger.
//!
//! Run with: cargo run --example worker_pool

use rust_log_pipeline::info;
use rust_log_pipeline::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Log Pipeline - Worker Pool Example ===\n");

    let logger = Arc::new(Logger::new("pool-demo"));
    logger.add_channel(ConsoleChannel::new());
    logger.enable_async()?;

    let pool = WorkerPool::with_logger(2, Arc::clone(&logger))?;
    let done = Arc::new(Semaphore::new(0));

    for job in 0..6 {
        let (logger, done) = (Arc::clone(&logger), Arc::clone(&done));
        pool.submit(move || {
            thread::sleep(Duration::from_millis(20));
            info!(logger, "job {} finished", job);
            done.post_one();
        });
    }
    {
        let (logger, done) = (Arc::clone(&logger), Arc::clone(&done));
        pool.submit_priority(move || {
            info!(logger, "priority job runs before the queued ones");
            done.post_one();
        });
    }
    {
        let done = Arc::clone(&done);
        pool.submit(move || {
            done.post_one();
            panic!("this job fails on purpose");
        });
    }

    for _ in 0..8 {
        done.wait();
    }
    drop(pool);
    logger.shutdown();

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
