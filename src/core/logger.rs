//! Main logger implementation

use super::{
    channel::{ChannelRef, LogChannel},
    error::Result,
    log_event::LogEvent,
    log_level::LogLevel,
    writer::{AsyncLogWriter, LogWriter},
};
use crate::util;
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Extract a readable message from a caught panic payload
pub(crate) fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Named set of channels that events are fanned out to.
///
/// Shared between a [`Logger`] and its installed writer so the writer's
/// thread can deliver events without holding on to the logger itself.
pub(crate) struct ChannelRegistry {
    logger_name: String,
    channels: RwLock<BTreeMap<String, ChannelRef>>,
}

impl ChannelRegistry {
    fn new(logger_name: String) -> Self {
        Self {
            logger_name,
            channels: RwLock::new(BTreeMap::new()),
        }
    }

    /// Copy the channel handles out so no registry lock is held during I/O
    fn snapshot(&self) -> Vec<(String, ChannelRef)> {
        self.channels
            .read()
            .iter()
            .map(|(name, channel)| (name.clone(), Arc::clone(channel)))
            .collect()
    }

    /// Deliver `events` in order to every channel, then flush each channel.
    ///
    /// **Per-Channel Isolation**: errors and panics from one channel are
    /// reported on stderr and never keep the other channels from receiving
    /// the event.
    pub(crate) fn write_channels(&self, events: &[Arc<LogEvent>]) {
        if events.is_empty() {
            return;
        }

        for (name, channel) in self.snapshot() {
            let mut channel = channel.lock();

            for event in events {
                let result = panic::catch_unwind(AssertUnwindSafe(|| {
                    channel.write(&self.logger_name, event)
                }));
                match result {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        eprintln!("[LOGGER WARNING] Channel '{}' failed to write: {}", name, e);
                    }
                    Err(panic_info) => {
                        eprintln!(
                            "[LOGGER CRITICAL] Channel '{}' panicked: {}. \
                             Other channels continue to function.",
                            name,
                            panic_message(panic_info.as_ref())
                        );
                    }
                }
            }

            let flushed = panic::catch_unwind(AssertUnwindSafe(|| channel.flush()));
            match flushed {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Channel '{}' flush failed: {}", name, e);
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Channel '{}' panicked during flush: {}",
                        name,
                        panic_message(panic_info.as_ref())
                    );
                }
            }
        }
    }
}

/// Fans log events out to a registry of named channels.
///
/// Without a writer every [`write`](Self::write) is delivered synchronously
/// on the calling thread. With a writer installed (see
/// [`enable_async`](Self::enable_async)) events are handed to it and the
/// call returns immediately.
pub struct Logger {
    registry: Arc<ChannelRegistry>,
    writer: RwLock<Option<Box<dyn LogWriter>>>,
}

impl Logger {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            registry: Arc::new(ChannelRegistry::new(name.into())),
            writer: RwLock::new(None),
        }
    }

    /// The process-wide logger, created on first use and named after the
    /// executable.
    ///
    /// Statics are never dropped, so call [`shutdown`](Self::shutdown) before
    /// exiting when an async writer is installed.
    pub fn global() -> &'static Logger {
        GLOBAL_LOGGER.get_or_init(|| Logger::new(util::executable_name()))
    }

    pub fn name(&self) -> &str {
        &self.registry.logger_name
    }

    pub(crate) fn registry(&self) -> Arc<ChannelRegistry> {
        Arc::clone(&self.registry)
    }

    /// Register a channel, replacing any channel with the same name.
    ///
    /// Returns the shared handle so the caller can reconfigure it later.
    pub fn add_channel<C: LogChannel + 'static>(&self, channel: C) -> ChannelRef {
        let channel: ChannelRef = Arc::new(Mutex::new(channel));
        self.add_channel_ref(Arc::clone(&channel));
        channel
    }

    pub fn add_channel_ref(&self, channel: ChannelRef) {
        let name = channel.lock().name().to_string();
        self.registry.channels.write().insert(name, channel);
    }

    pub fn del_channel(&self, name: &str) -> Option<ChannelRef> {
        self.registry.channels.write().remove(name)
    }

    pub fn get_channel(&self, name: &str) -> Option<ChannelRef> {
        self.registry.channels.read().get(name).cloned()
    }

    /// Registered channel names in fan-out order
    pub fn channel_names(&self) -> Vec<String> {
        self.registry.channels.read().keys().cloned().collect()
    }

    /// Set the threshold of every registered channel
    pub fn set_level(&self, level: LogLevel) {
        for (_, channel) in self.registry.snapshot() {
            channel.lock().set_level(level);
        }
    }

    /// Toggle the detail prefix on every registered channel
    pub fn set_detail(&self, detail: bool) {
        for (_, channel) in self.registry.snapshot() {
            channel.lock().set_detail(detail);
        }
    }

    /// Install or remove the writer.
    ///
    /// The replaced writer is drained into the channels before the lock is
    /// released, so producers cannot overtake events it still buffers. Its
    /// thread only touches the channel registry, never this lock.
    pub fn set_writer(&self, writer: Option<Box<dyn LogWriter>>) {
        let mut slot = self.writer.write();
        drop(std::mem::replace(&mut *slot, writer));
    }

    /// Install an [`AsyncLogWriter`] delivering to this logger's channels
    pub fn enable_async(&self) -> Result<()> {
        let writer = AsyncLogWriter::new(self)?;
        self.set_writer(Some(Box::new(writer)));
        Ok(())
    }

    pub fn has_writer(&self) -> bool {
        self.writer.read().is_some()
    }

    /// Hand an event to the writer, or deliver it synchronously
    pub fn write(&self, event: Arc<LogEvent>) {
        {
            let writer = self.writer.read();
            if let Some(writer) = writer.as_ref() {
                writer.write(event);
                return;
            }
        }
        self.registry.write_channels(std::slice::from_ref(&event));
    }

    pub fn flush(&self) -> Result<()> {
        for (_, channel) in self.registry.snapshot() {
            channel.lock().flush()?;
        }
        Ok(())
    }

    /// Remove the writer (draining it) and flush every channel
    pub fn shutdown(&self) {
        self.set_writer(None);
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }

    /// Log with the caller's file and line.
    ///
    /// The enclosing function name is not available here, so the detail
    /// prefix leaves it out. Use the `log!` family of macros to record it.
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        let location = panic::Location::caller();
        let event = LogEvent::new(level, message).with_location(location.file(), "", location.line());
        self.write(Arc::new(event));
    }

    #[inline]
    #[track_caller]
    pub fn trace(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_log_pipeline::prelude::*;
///
/// let logger = Logger::builder()
///     .name("server")
///     .channel(ConsoleChannel::new())
///     .level(LogLevel::Debug)
///     .async_mode(true)
///     .build()
///     .unwrap();
/// ```
pub struct LoggerBuilder {
    name: Option<String>,
    level: Option<LogLevel>,
    detail: Option<bool>,
    channels: Vec<ChannelRef>,
    async_mode: bool,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: None,
            level: None,
            detail: None,
            channels: Vec::new(),
            async_mode: false,
        }
    }

    /// Logger name, defaults to the executable name
    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Level applied to every channel once they are all added
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Detail flag applied to every channel once they are all added
    #[must_use = "builder methods return a new value"]
    pub fn detail(mut self, detail: bool) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Add a channel
    #[must_use = "builder methods return a new value"]
    pub fn channel<C: LogChannel + 'static>(mut self, channel: C) -> Self {
        self.channels.push(Arc::new(Mutex::new(channel)));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn channel_ref(mut self, channel: ChannelRef) -> Self {
        self.channels.push(channel);
        self
    }

    /// Deliver events from a background [`AsyncLogWriter`]
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, enabled: bool) -> Self {
        self.async_mode = enabled;
        self
    }

    /// Build the Logger
    ///
    /// Fails only if the async writer thread cannot be started.
    pub fn build(self) -> Result<Logger> {
        let logger = Logger::new(self.name.unwrap_or_else(util::executable_name));
        for channel in self.channels {
            logger.add_channel_ref(channel);
        }
        if let Some(level) = self.level {
            logger.set_level(level);
        }
        if let Some(detail) = self.detail {
            logger.set_detail(detail);
        }
        if self.async_mode {
            logger.enable_async()?;
        }
        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChannelConfig, LoggerError};

    /// Records the message of every accepted event
    struct RecordingChannel {
        config: ChannelConfig,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingChannel {
        fn new(name: &str) -> (Self, Arc<Mutex<Vec<String>>>) {
            let seen = Arc::new(Mutex::new(Vec::new()));
            let channel = Self {
                config: ChannelConfig::new(name, LogLevel::Trace),
                seen: Arc::clone(&seen),
            };
            (channel, seen)
        }
    }

    impl LogChannel for RecordingChannel {
        fn config(&self) -> &ChannelConfig {
            &self.config
        }

        fn config_mut(&mut self) -> &mut ChannelConfig {
            &mut self.config
        }

        fn write(&mut self, _logger_name: &str, event: &LogEvent) -> Result<()> {
            if self.config.accepts(event.level) {
                self.seen.lock().push(event.message.clone());
            }
            Ok(())
        }
    }

    struct FailingChannel {
        config: ChannelConfig,
        panic: bool,
    }

    impl LogChannel for FailingChannel {
        fn config(&self) -> &ChannelConfig {
            &self.config
        }

        fn config_mut(&mut self) -> &mut ChannelConfig {
            &mut self.config
        }

        fn write(&mut self, _logger_name: &str, _event: &LogEvent) -> Result<()> {
            if self.panic {
                panic!("channel exploded");
            }
            Err(LoggerError::writer("always fails"))
        }
    }

    #[test]
    fn test_sync_fan_out() {
        let logger = Logger::new("test");
        let (a, seen_a) = RecordingChannel::new("a");
        let (b, seen_b) = RecordingChannel::new("b");
        logger.add_channel(a);
        logger.add_channel(b);

        logger.info("hello");
        assert_eq!(*seen_a.lock(), vec!["hello"]);
        assert_eq!(*seen_b.lock(), vec!["hello"]);
        assert_eq!(logger.channel_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_add_same_name_replaces() {
        let logger = Logger::new("test");
        let (first, seen_first) = RecordingChannel::new("dup");
        let (second, seen_second) = RecordingChannel::new("dup");
        logger.add_channel(first);
        logger.add_channel(second);

        logger.warn("only second");
        assert_eq!(logger.channel_names().len(), 1);
        assert!(seen_first.lock().is_empty());
        assert_eq!(*seen_second.lock(), vec!["only second"]);
    }

    #[test]
    fn test_del_and_get_channel() {
        let logger = Logger::new("test");
        let (channel, seen) = RecordingChannel::new("gone");
        logger.add_channel(channel);

        assert!(logger.get_channel("gone").is_some());
        assert!(logger.get_channel("missing").is_none());
        assert!(logger.del_channel("gone").is_some());
        assert!(logger.del_channel("gone").is_none());

        logger.error("nobody listens");
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_set_level_broadcasts() {
        let logger = Logger::new("test");
        let (a, seen_a) = RecordingChannel::new("a");
        let (b, seen_b) = RecordingChannel::new("b");
        logger.add_channel(a);
        let b_ref = logger.add_channel(b);

        logger.set_level(LogLevel::Warn);
        assert_eq!(b_ref.lock().level(), LogLevel::Warn);

        logger.info("dropped");
        logger.error("kept");
        assert_eq!(*seen_a.lock(), vec!["kept"]);
        assert_eq!(*seen_b.lock(), vec!["kept"]);
    }

    #[test]
    fn test_failing_channels_do_not_block_others() {
        let logger = Logger::new("test");
        logger.add_channel(FailingChannel {
            config: ChannelConfig::new("0-error", LogLevel::Trace),
            panic: false,
        });
        logger.add_channel(FailingChannel {
            config: ChannelConfig::new("1-panic", LogLevel::Trace),
            panic: true,
        });
        let (ok, seen) = RecordingChannel::new("2-ok");
        logger.add_channel(ok);

        logger.info("survives");
        logger.info("again");
        assert_eq!(*seen.lock(), vec!["survives", "again"]);
    }

    #[test]
    fn test_log_captures_caller_location() {
        let logger = Logger::new("test");
        let captured = Arc::new(Mutex::new(None));

        struct LocationChannel {
            config: ChannelConfig,
            captured: Arc<Mutex<Option<(String, String, u32)>>>,
        }

        impl LogChannel for LocationChannel {
            fn config(&self) -> &ChannelConfig {
                &self.config
            }
            fn config_mut(&mut self) -> &mut ChannelConfig {
                &mut self.config
            }
            fn write(&mut self, _logger_name: &str, event: &LogEvent) -> Result<()> {
                *self.captured.lock() =
                    Some((event.file.clone(), event.function.clone(), event.line));
                Ok(())
            }
        }

        logger.add_channel(LocationChannel {
            config: ChannelConfig::new("loc", LogLevel::Trace),
            captured: Arc::clone(&captured),
        });

        let line = line!() + 1;
        logger.debug("where am I");
        assert_eq!(
            captured.lock().clone(),
            Some(("logger.rs".to_string(), String::new(), line))
        );
    }

    #[test]
    fn test_builder() {
        let (channel, seen) = RecordingChannel::new("rec");
        let logger = Logger::builder()
            .name("built")
            .channel(channel)
            .level(LogLevel::Info)
            .build()
            .unwrap();

        assert_eq!(logger.name(), "built");
        assert!(!logger.has_writer());
        logger.debug("filtered");
        logger.info("passes");
        assert_eq!(*seen.lock(), vec!["passes"]);
    }

    #[test]
    fn test_builder_async_mode() {
        let (channel, seen) = RecordingChannel::new("rec");
        let logger = Logger::builder()
            .name("async")
            .channel(channel)
            .async_mode(true)
            .build()
            .unwrap();
        assert!(logger.has_writer());

        for i in 0..10 {
            logger.info(format!("message {}", i));
        }
        logger.shutdown();

        assert!(!logger.has_writer());
        let expected: Vec<String> = (0..10).map(|i| format!("message {}", i)).collect();
        assert_eq!(*seen.lock(), expected);
    }

    #[test]
    fn test_global_logger_is_shared() {
        let first = Logger::global() as *const Logger;
        let second = Logger::global() as *const Logger;
        assert_eq!(first, second);
        assert_eq!(Logger::global().name(), util::executable_name());
    }
}
