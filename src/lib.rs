//! # Rust Log Pipeline
//!
//! A small concurrent logging pipeline: events are captured at the call site,
//! fanned out to named channels and optionally delivered from a background
//! writer thread.
//!
//! ## Features
//!
//! - **Channels**: console, plain file and daily rotating files with retention
//! - **Async Delivery**: producers only append to a pending list
//! - **Thread Safe**: every operation may be called from any thread
//! - **Worker Pool**: fixed-size pool with priority submission
//!
//! ## Example
//!
//! ```
//! use rust_log_pipeline::prelude::*;
//! use rust_log_pipeline::info;
//!
//! let logger = Logger::builder()
//!     .name("app")
//!     .channel(ConsoleChannel::new().with_colors(false))
//!     .level(LogLevel::Info)
//!     .build()
//!     .unwrap();
//!
//! info!(logger, "Started with {} workers", 4);
//! ```

pub mod channels;
pub mod concurrency;
pub mod core;
pub mod macros;
pub mod util;

pub mod prelude {
    pub use crate::channels::{ConsoleChannel, FileChannel, RotatingFileChannel};
    pub use crate::concurrency::{Semaphore, TaskQueue, WorkerPool};
    pub use crate::core::{
        AsyncLogWriter, ChannelConfig, ChannelRef, LogCapturer, LogChannel, LogEvent, LogLevel,
        LogWriter, Logger, LoggerBuilder, LoggerConfig, LoggerError, Result,
    };
}

pub use crate::channels::{ConsoleChannel, FileChannel, RotatingFileChannel};
pub use crate::concurrency::{Semaphore, TaskQueue, WorkerPool};
pub use crate::core::{
    AsyncLogWriter, ChannelConfig, ChannelRef, ChannelSpec, LogCapturer, LogChannel, LogEvent,
    LogLevel, LogWriter, Logger, LoggerBuilder, LoggerConfig, LoggerError, Result,
};
