//! Console channel implementation

use crate::core::format::format_line;
use crate::core::{ChannelConfig, LogChannel, LogEvent, LogLevel, Result};
use std::io::{self, Write};

pub const DEFAULT_CONSOLE_CHANNEL: &str = "ConsoleChannel";

/// Writes every accepted event to standard output, colored by level.
///
/// # Example
///
/// ```
/// use rust_log_pipeline::channels::ConsoleChannel;
/// use rust_log_pipeline::LogLevel;
///
/// let channel = ConsoleChannel::new()
///     .with_level(LogLevel::Info)
///     .with_detail(false);
/// ```
pub struct ConsoleChannel {
    config: ChannelConfig,
    #[cfg_attr(not(feature = "console"), allow(dead_code))]
    use_colors: bool,
    out: Box<dyn Write + Send>,
}

impl ConsoleChannel {
    pub fn new() -> Self {
        Self::with_name(DEFAULT_CONSOLE_CHANNEL)
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            config: ChannelConfig::new(name, LogLevel::Trace),
            use_colors: true,
            out: Box::new(io::stdout()),
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: bool) -> Self {
        self.config.detail = detail;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Redirect output away from stdout, e.g. into a buffer
    #[must_use]
    pub fn with_writer(mut self, out: impl Write + Send + 'static) -> Self {
        self.out = Box::new(out);
        self
    }
}

impl Default for ConsoleChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl LogChannel for ConsoleChannel {
    fn config(&self) -> &ChannelConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut ChannelConfig {
        &mut self.config
    }

    fn write(&mut self, logger_name: &str, event: &LogEvent) -> Result<()> {
        if !self.config.accepts(event.level) {
            return Ok(());
        }
        let Some(line) = format_line(logger_name, event, self.config.detail) else {
            return Ok(());
        };

        #[cfg(feature = "console")]
        let line = if self.use_colors {
            crate::core::format::colorize(&line, event)
        } else {
            line
        };

        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
