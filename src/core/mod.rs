//! Core logger types and traits

pub mod capturer;
pub mod channel;
pub mod config;
pub mod error;
pub mod format;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod writer;

pub use capturer::LogCapturer;
pub use channel::{ChannelConfig, ChannelRef, LogChannel};
pub use config::{ChannelSpec, LoggerConfig};
pub use error::{LoggerError, Result};
pub use log_event::LogEvent;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use writer::{AsyncLogWriter, LogWriter};
