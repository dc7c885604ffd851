//! Daily rotating file channel
//!
//! Each event is routed to `<dir>/YYYY-MM-DD.log` according to its day bucket
//! (`seconds / 86400`, named after the UTC date). Every file the channel has
//! opened is remembered, and when the active day changes files older than the
//! retention window are deleted.

use super::file::FileChannel;
use crate::core::log_event::SECONDS_PER_DAY;
use crate::core::{ChannelConfig, LogChannel, LogEvent, LogLevel, Result};
use crate::util;
use chrono::DateTime;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_ROTATING_CHANNEL: &str = "RotatingFileChannel";

/// Number of days kept unless configured otherwise
pub const DEFAULT_MAX_DAYS: u32 = 30;

/// File path for a day bucket inside `dir`
pub fn day_file_path(dir: &Path, day: i64) -> PathBuf {
    let name = DateTime::from_timestamp(day.saturating_mul(SECONDS_PER_DAY), 0)
        .map(|date| date.format("%Y-%m-%d.log").to_string())
        .unwrap_or_else(|| format!("day-{}.log", day));
    dir.join(name)
}

/// # Examples
///
/// ```no_run
/// use rust_log_pipeline::channels::RotatingFileChannel;
///
/// // Keep one week of daily files under /var/log/myapp
/// let channel = RotatingFileChannel::new("/var/log/myapp").with_max_days(7);
/// ```
pub struct RotatingFileChannel {
    file: FileChannel,
    dir: PathBuf,
    last_day: Option<i64>,
    retained: BTreeMap<i64, PathBuf>,
    max_days: u32,
    writable: bool,
}

impl RotatingFileChannel {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_name(DEFAULT_ROTATING_CHANNEL, dir)
    }

    pub fn with_name(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            file: FileChannel::with_name(name, PathBuf::new()),
            dir: dir.into(),
            last_day: None,
            retained: BTreeMap::new(),
            max_days: DEFAULT_MAX_DAYS,
            writable: false,
        }
    }

    /// Channel writing into `<executable dir>/log/`
    pub fn beside_executable() -> Self {
        Self::new(util::executable_dir().join("log"))
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.file.set_level(level);
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: bool) -> Self {
        self.file.set_detail(detail);
        self
    }

    #[must_use]
    pub fn with_max_days(mut self, max_days: u32) -> Self {
        self.set_max_days(max_days);
        self
    }

    /// Retention window in days, clamped to at least one
    pub fn set_max_days(&mut self, max_days: u32) {
        self.max_days = max_days.max(1);
    }

    pub fn max_days(&self) -> u32 {
        self.max_days
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file currently written to, if any day was seen yet
    pub fn current_path(&self) -> Option<&Path> {
        self.last_day.map(|_| self.file.path())
    }

    /// Day buckets whose files are still retained, oldest first
    pub fn retained_days(&self) -> Vec<i64> {
        self.retained.keys().copied().collect()
    }

    pub fn retained_path(&self, day: i64) -> Option<&Path> {
        self.retained.get(&day).map(PathBuf::as_path)
    }

    fn rotate(&mut self, day: i64) -> Result<()> {
        self.last_day = Some(day);
        let path = day_file_path(&self.dir, day);
        self.retained.entry(day).or_insert_with(|| path.clone());

        let opened = self.file.set_path(path);
        self.writable = opened.is_ok();
        self.clean(day);
        opened
    }

    /// Delete every retained file at least `max_days` days older than `today`
    fn clean(&mut self, today: i64) {
        let max_days = i64::from(self.max_days);
        while let Some(entry) = self.retained.first_entry() {
            if today < *entry.key() + max_days {
                break;
            }
            let (day, path) = entry.remove_entry();
            if let Err(e) = util::remove_path_recursive(&path) {
                eprintln!(
                    "[LOGGER WARNING] Failed to remove expired log file for day {}: {}",
                    day, e
                );
            }
        }
    }
}

impl LogChannel for RotatingFileChannel {
    fn config(&self) -> &ChannelConfig {
        self.file.config()
    }

    fn config_mut(&mut self) -> &mut ChannelConfig {
        self.file.config_mut()
    }

    fn write(&mut self, logger_name: &str, event: &LogEvent) -> Result<()> {
        if !self.config().accepts(event.level) {
            return Ok(());
        }

        let day = event.day_bucket();
        if self.last_day != Some(day) {
            // A failed open is reported once; later events that day are dropped.
            self.rotate(day)?;
        }
        if !self.writable {
            return Ok(());
        }
        self.file.write_unfiltered(logger_name, event)
    }

    fn flush(&mut self) -> Result<()> {
        self.file.flush()
    }
}
