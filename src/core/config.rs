//! Declarative logger configuration
//!
//! A [`LoggerConfig`] can be deserialized from JSON and turned into a ready
//! [`Logger`]:
//!
//! ```
//! use rust_log_pipeline::LoggerConfig;
//!
//! let config = LoggerConfig::from_json(r#"{
//!     "name": "server",
//!     "channels": [
//!         { "type": "console", "level": "info", "colors": false },
//!         { "type": "rotating_file", "dir": "/tmp/server-logs", "max_days": 7 }
//!     ]
//! }"#).unwrap();
//! assert_eq!(config.channels.len(), 2);
//! ```

use super::{
    error::{LoggerError, Result},
    log_level::LogLevel,
    logger::{Logger, LoggerBuilder},
};
use crate::channels::{
    console::DEFAULT_CONSOLE_CHANNEL, file::DEFAULT_FILE_CHANNEL,
    rotating_file::DEFAULT_ROTATING_CHANNEL, ConsoleChannel, FileChannel, RotatingFileChannel,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_true() -> bool {
    true
}

fn default_max_days() -> u32 {
    crate::channels::rotating_file::DEFAULT_MAX_DAYS
}

/// One channel entry of a [`LoggerConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChannelSpec {
    Console {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        level: LogLevel,
        #[serde(default = "default_true")]
        detail: bool,
        #[serde(default = "default_true")]
        colors: bool,
    },
    File {
        #[serde(default)]
        name: Option<String>,
        /// Defaults to `<executable>.log`
        #[serde(default)]
        path: Option<PathBuf>,
        #[serde(default)]
        level: LogLevel,
        #[serde(default = "default_true")]
        detail: bool,
    },
    RotatingFile {
        #[serde(default)]
        name: Option<String>,
        /// Defaults to `<executable dir>/log/`
        #[serde(default)]
        dir: Option<PathBuf>,
        #[serde(default)]
        level: LogLevel,
        #[serde(default = "default_true")]
        detail: bool,
        #[serde(default = "default_max_days")]
        max_days: u32,
    },
}

impl ChannelSpec {
    fn add_to(self, builder: LoggerBuilder) -> LoggerBuilder {
        match self {
            ChannelSpec::Console {
                name,
                level,
                detail,
                colors,
            } => builder.channel(
                ConsoleChannel::with_name(name.unwrap_or_else(|| DEFAULT_CONSOLE_CHANNEL.into()))
                    .with_level(level)
                    .with_detail(detail)
                    .with_colors(colors),
            ),
            ChannelSpec::File {
                name,
                path,
                level,
                detail,
            } => {
                let path =
                    path.unwrap_or_else(|| FileChannel::beside_executable().path().to_path_buf());
                builder.channel(
                    FileChannel::with_name(name.unwrap_or_else(|| DEFAULT_FILE_CHANNEL.into()), path)
                        .with_level(level)
                        .with_detail(detail),
                )
            }
            ChannelSpec::RotatingFile {
                name,
                dir,
                level,
                detail,
                max_days,
            } => {
                let dir = dir
                    .unwrap_or_else(|| RotatingFileChannel::beside_executable().dir().to_path_buf());
                builder.channel(
                    RotatingFileChannel::with_name(
                        name.unwrap_or_else(|| DEFAULT_ROTATING_CHANNEL.into()),
                        dir,
                    )
                    .with_level(level)
                    .with_detail(detail)
                    .with_max_days(max_days),
                )
            }
        }
    }
}

/// Complete description of a logger and its channels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Defaults to the executable name
    #[serde(default)]
    pub name: Option<String>,
    /// When set, overrides every channel's own level
    #[serde(default)]
    pub level: Option<LogLevel>,
    /// Deliver events from a background writer thread
    #[serde(default, rename = "async")]
    pub async_mode: bool,
    #[serde(default)]
    pub channels: Vec<ChannelSpec>,
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logger configuration",
                format!("Cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json(&json)
    }

    /// Reject channel lists with duplicate names
    pub fn validate(&self) -> Result<()> {
        let mut names: Vec<&str> = self
            .channels
            .iter()
            .map(|spec| match spec {
                ChannelSpec::Console { name, .. } => {
                    name.as_deref().unwrap_or(DEFAULT_CONSOLE_CHANNEL)
                }
                ChannelSpec::File { name, .. } => name.as_deref().unwrap_or(DEFAULT_FILE_CHANNEL),
                ChannelSpec::RotatingFile { name, .. } => {
                    name.as_deref().unwrap_or(DEFAULT_ROTATING_CHANNEL)
                }
            })
            .collect();
        names.sort_unstable();
        if let Some(pair) = names.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(LoggerError::config(
                "LoggerConfig",
                format!("duplicate channel name '{}'", pair[0]),
            ));
        }
        Ok(())
    }

    pub fn build(self) -> Result<Logger> {
        self.validate()?;

        let mut builder = Logger::builder().async_mode(self.async_mode);
        if let Some(name) = self.name {
            builder = builder.name(name);
        }
        if let Some(level) = self.level {
            builder = builder.level(level);
        }
        for spec in self.channels {
            builder = spec.add_to(builder);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_from_minimal_json() {
        let config = LoggerConfig::from_json(r#"{ "channels": [ { "type": "console" } ] }"#).unwrap();
        assert_eq!(config.name, None);
        assert!(!config.async_mode);
        assert_eq!(
            config.channels[0],
            ChannelSpec::Console {
                name: None,
                level: LogLevel::Trace,
                detail: true,
                colors: true,
            }
        );
    }

    #[test]
    fn test_rotating_defaults() {
        let config = LoggerConfig::from_json(
            r#"{ "channels": [ { "type": "rotating_file", "dir": "logs" } ] }"#,
        )
        .unwrap();
        match &config.channels[0] {
            ChannelSpec::RotatingFile { max_days, dir, .. } => {
                assert_eq!(*max_days, 30);
                assert_eq!(dir.as_deref(), Some(Path::new("logs")));
            }
            other => panic!("unexpected spec {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = LoggerConfig::from_json(
            r#"{ "channels": [ { "type": "console" }, { "type": "console" } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_invalid_json_is_json_error() {
        let err = LoggerConfig::from_json(r#"{ "channels": [ { "type": "syslog" } ] }"#).unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
    }

    #[test]
    fn test_build_logger() {
        let dir = tempdir().unwrap();
        let json = format!(
            r#"{{
                "name": "configured",
                "level": "warn",
                "channels": [
                    {{ "type": "console", "name": "out", "colors": false }},
                    {{ "type": "file", "name": "plain", "path": {:?} }},
                    {{ "type": "rotating_file", "name": "daily", "dir": {:?}, "max_days": 2 }}
                ]
            }}"#,
            dir.path().join("plain.log"),
            dir.path().join("daily"),
        );

        let logger = LoggerConfig::from_json(&json).unwrap().build().unwrap();
        assert_eq!(logger.name(), "configured");
        assert_eq!(logger.channel_names(), vec!["daily", "out", "plain"]);
        for name in logger.channel_names() {
            let channel = logger.get_channel(&name).unwrap();
            assert_eq!(channel.lock().level(), LogLevel::Warn);
        }
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logger.json");
        std::fs::write(&path, r#"{ "name": "from-file", "async": true }"#).unwrap();

        let config = LoggerConfig::from_file(&path).unwrap();
        assert_eq!(config.name.as_deref(), Some("from-file"));
        assert!(config.async_mode);

        let missing = LoggerConfig::from_file(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, LoggerError::IoOperation { .. }));
    }
}
