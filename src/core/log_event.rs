//! Log event structure

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};

/// Seconds in one day bucket
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// One log statement, sealed once it is handed to a [`Logger`](super::Logger).
///
/// Events are shared as `Arc<LogEvent>` between every channel that receives
/// them during fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub file: String,
    pub function: String,
    pub line: u32,
}

impl LogEvent {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so one event always renders as one output line.
    pub(crate) fn sanitize_message(message: &str) -> String {
        if !message.contains(['\n', '\r', '\t']) {
            return message.to_string();
        }
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: impl AsRef<str>) -> Self {
        Self {
            level,
            message: Self::sanitize_message(message.as_ref()),
            timestamp: Utc::now(),
            file: String::new(),
            function: String::new(),
            line: 0,
        }
    }

    /// Attach the source location. Only the base name of `file` is kept.
    pub fn with_location(mut self, file: &str, function: &str, line: u32) -> Self {
        self.file = base_name(file).to_string();
        self.function = function.to_string();
        self.line = line;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Whole seconds since the Unix epoch
    pub fn seconds(&self) -> i64 {
        self.timestamp.timestamp()
    }

    /// Microseconds within the current second
    pub fn micros(&self) -> u32 {
        self.timestamp.timestamp_subsec_micros()
    }

    /// Day index used to pick a rotating file
    pub fn day_bucket(&self) -> i64 {
        self.seconds().div_euclid(SECONDS_PER_DAY)
    }
}

fn base_name(file: &str) -> &str {
    file.rsplit(['/', '\\']).next().unwrap_or(file)
}
