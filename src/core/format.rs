//! Text line formatting shared by all channels
//!
//! Every channel renders an event as
//! `<timestamp> <L> [<logger>[<pid>] <file>:<line> <function> | ]<message>`,
//! where the bracketed part is only present when the channel's detail flag is
//! set and the timestamp is local time with millisecond precision.

use super::log_event::LogEvent;
use chrono::{DateTime, Local, Utc};
use std::fmt::Write;

/// Timestamp layout used at the head of every line
pub const LINE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Render a timestamp as `YYYY-MM-DD HH:MM:SS.mmm` in local time
pub fn print_time(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format(LINE_TIME_FORMAT)
        .to_string()
}

/// Format one event without a trailing newline.
///
/// Returns `None` when there is nothing worth writing: detail is off and the
/// message body is empty.
pub fn format_line(logger_name: &str, event: &LogEvent, detail: bool) -> Option<String> {
    if !detail && event.message.is_empty() {
        return None;
    }

    let mut line = String::with_capacity(64 + event.message.len());
    // Writing into a String cannot fail.
    let _ = write!(line, "{} {} ", print_time(&event.timestamp), event.level.letter());

    if detail {
        let _ = write!(
            line,
            "{}[{}] {}:{} ",
            logger_name,
            std::process::id(),
            event.file,
            event.line
        );
        if !event.function.is_empty() {
            line.push_str(&event.function);
            line.push(' ');
        }
        line.push_str("| ");
    }

    line.push_str(&event.message);
    Some(line)
}

/// Wrap a formatted line in the level's console color
#[cfg(feature = "console")]
pub fn colorize(line: &str, event: &LogEvent) -> String {
    use colored::Colorize;
    line.color(event.level.color_code()).to_string()
}
