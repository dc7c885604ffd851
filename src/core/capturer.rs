//! Scoped event builder used by the logging macros

use super::{log_event::LogEvent, log_level::LogLevel, logger::Logger};
use std::fmt;
use std::sync::Arc;

/// Accumulates message text for one event and hands the sealed event to its
/// logger when dropped.
///
/// Text is appended through [`fmt::Write`], so `write!` works on it:
///
/// ```
/// use rust_log_pipeline::{LogCapturer, LogLevel, Logger};
/// use std::fmt::Write;
///
/// let logger = Logger::new("app");
/// let mut capture = LogCapturer::new(&logger, LogLevel::Info, file!(), "main", line!());
/// write!(capture, "{} items processed", 3).unwrap();
/// // Event delivered here
/// drop(capture);
/// ```
pub struct LogCapturer<'a> {
    logger: &'a Logger,
    event: Option<LogEvent>,
}

impl<'a> LogCapturer<'a> {
    pub fn new(logger: &'a Logger, level: LogLevel, file: &str, function: &str, line: u32) -> Self {
        Self {
            logger,
            event: Some(LogEvent::new(level, "").with_location(file, function, line)),
        }
    }

    /// Append text to the message body
    pub fn append(&mut self, text: &str) -> &mut Self {
        if let Some(event) = self.event.as_mut() {
            event.message.push_str(&LogEvent::sanitize_message(text));
        }
        self
    }

    /// Deliver the event now instead of at the end of the scope
    pub fn finish(mut self) {
        self.deliver();
    }

    /// Discard the event; nothing is written
    pub fn clear(&mut self) {
        self.event = None;
    }

    fn deliver(&mut self) {
        if let Some(event) = self.event.take() {
            self.logger.write(Arc::new(event));
        }
    }
}

impl fmt::Write for LogCapturer<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s);
        Ok(())
    }
}

impl Drop for LogCapturer<'_> {
    fn drop(&mut self) {
        self.deliver();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChannelConfig, LogChannel, Result};
    use parking_lot::Mutex;
    use std::fmt::Write;

    struct Collect {
        config: ChannelConfig,
        events: Arc<Mutex<Vec<LogEvent>>>,
    }

    impl LogChannel for Collect {
        fn config(&self) -> &ChannelConfig {
            &self.config
        }

        fn config_mut(&mut self) -> &mut ChannelConfig {
            &mut self.config
        }

        fn write(&mut self, _logger_name: &str, event: &LogEvent) -> Result<()> {
            self.events.lock().push(event.clone());
            Ok(())
        }
    }

    fn logger_with_collector() -> (Logger, Arc<Mutex<Vec<LogEvent>>>) {
        let logger = Logger::new("capture");
        let events = Arc::new(Mutex::new(Vec::new()));
        logger.add_channel(Collect {
            config: ChannelConfig::new("collect", LogLevel::Trace),
            events: Arc::clone(&events),
        });
        (logger, events)
    }

    #[test]
    fn test_delivered_on_drop() {
        let (logger, events) = logger_with_collector();
        {
            let mut capture = LogCapturer::new(&logger, LogLevel::Warn, "src/a.rs", "run", 9);
            write!(capture, "part {}", 1).unwrap();
            capture.append(" and part 2");
            assert!(events.lock().is_empty());
        }

        let events = events.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "part 1 and part 2");
        assert_eq!(events[0].level, LogLevel::Warn);
        assert_eq!(events[0].file, "a.rs");
        assert_eq!(events[0].function, "run");
        assert_eq!(events[0].line, 9);
    }

    #[test]
    fn test_finish_delivers_once() {
        let (logger, events) = logger_with_collector();
        let mut capture = LogCapturer::new(&logger, LogLevel::Info, "a.rs", "f", 1);
        capture.append("once");
        capture.finish();
        assert_eq!(events.lock().len(), 1);
    }

    #[test]
    fn test_clear_discards() {
        let (logger, events) = logger_with_collector();
        {
            let mut capture = LogCapturer::new(&logger, LogLevel::Info, "a.rs", "f", 1);
            capture.append("never seen");
            capture.clear();
            capture.append("still nothing");
        }
        assert!(events.lock().is_empty());
    }

    #[test]
    fn test_appended_newlines_are_escaped() {
        let (logger, events) = logger_with_collector();
        {
            let mut capture = LogCapturer::new(&logger, LogLevel::Info, "a.rs", "f", 1);
            capture.append("line one\nline two");
        }
        assert_eq!(events.lock()[0].message, "line one\\nline two");
    }
}
