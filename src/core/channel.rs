//! Channel trait for log output destinations

use super::{error::Result, log_event::LogEvent, log_level::LogLevel};
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared handle to a registered channel
pub type ChannelRef = Arc<Mutex<dyn LogChannel>>;

/// Settings common to every channel variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    pub name: String,
    pub level: LogLevel,
    /// Whether lines carry the `logger[pid] file:line function |` prefix
    pub detail: bool,
}

impl ChannelConfig {
    pub fn new(name: impl Into<String>, level: LogLevel) -> Self {
        Self {
            name: name.into(),
            level,
            detail: true,
        }
    }

    #[inline]
    pub fn accepts(&self, level: LogLevel) -> bool {
        level >= self.level
    }
}

/// A configured sink that formats and emits events.
///
/// Implementors only provide access to their [`ChannelConfig`] and the
/// `write` itself; naming and level handling come from the default methods.
pub trait LogChannel: Send {
    fn config(&self) -> &ChannelConfig;
    fn config_mut(&mut self) -> &mut ChannelConfig;

    /// Emit one event. `logger_name` is used by the detail prefix.
    fn write(&mut self, logger_name: &str, event: &LogEvent) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        &self.config().name
    }

    fn level(&self) -> LogLevel {
        self.config().level
    }

    fn set_level(&mut self, level: LogLevel) {
        self.config_mut().level = level;
    }

    fn set_detail(&mut self, detail: bool) {
        self.config_mut().detail = detail;
    }
}
