//! File channel implementation

use crate::core::format::format_line;
use crate::core::{ChannelConfig, LogChannel, LogEvent, LogLevel, LoggerError, Result};
use crate::util;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_CHANNEL: &str = "FileChannel";

/// Appends events to a single file.
///
/// The file is opened lazily on the first accepted event; missing parent
/// directories are created at that point.
pub struct FileChannel {
    config: ChannelConfig,
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileChannel {
    /// Channel writing to `path`, named [`DEFAULT_FILE_CHANNEL`]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_name(DEFAULT_FILE_CHANNEL, path)
    }

    pub fn with_name(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            config: ChannelConfig::new(name, LogLevel::Trace),
            path: path.into(),
            writer: None,
        }
    }

    /// Channel writing next to the executable as `<executable>.log`
    pub fn beside_executable() -> Self {
        let mut path = util::executable_path().into_os_string();
        path.push(".log");
        Self::new(path)
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

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// Switch to a new file, closing the current one first
    pub fn set_path(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.path = path.into();
        self.open()
    }

    /// (Re)open the file at the configured path in append mode
    pub fn open(&mut self) -> Result<()> {
        self.close();

        if self.path.as_os_str().is_empty() {
            return Err(LoggerError::config(
                self.config.name.clone(),
                "Log file path must be set",
            ));
        }

        util::ensure_directory_path(&self.path)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                LoggerError::file_channel(
                    self.path.display().to_string(),
                    format!("Failed to open: {}", e),
                )
            })?;
        self.writer = Some(BufWriter::new(file));
        Ok(())
    }

    pub fn close(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            // Best effort; the handle is released either way
            let _ = writer.flush();
        }
    }

    /// Write without level filtering; used by the rotating channel too
    pub(crate) fn write_unfiltered(&mut self, logger_name: &str, event: &LogEvent) -> Result<()> {
        if self.writer.is_none() {
            self.open()?;
        }
        let Some(line) = format_line(logger_name, event, self.config.detail) else {
            return Ok(());
        };

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;
        writeln!(writer, "{}", line).map_err(|e| {
            LoggerError::file_channel(
                self.path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })
    }
}

impl LogChannel for FileChannel {
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
        self.write_unfiltered(logger_name, event)
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_channel(
                    self.path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }
}

impl Drop for FileChannel {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        self.close();
    }
}
