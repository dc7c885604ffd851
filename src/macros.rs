//! Logging macros for ergonomic log message formatting.
//!
//! Each macro has two forms. With a format string first it logs through
//! [`Logger::global`](crate::Logger::global); with a logger expression first
//! it logs through that logger. The source file, line and enclosing function
//! are captured at the call site.
//!
//! # Examples
//!
//! ```
//! use rust_log_pipeline::prelude::*;
//! use rust_log_pipeline::info;
//!
//! let logger = Logger::new("server");
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // Through the process-wide logger
//! info!("Ready on {}", port);
//! ```

/// Name of the enclosing function, without its module path.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let mut name = __type_name_of(__here);
        name = name.strip_suffix("::__here").unwrap_or(name);
        while let Some(outer) = name.strip_suffix("::{{closure}}") {
            name = outer;
        }
        name.rsplit("::").next().unwrap_or(name)
    }};
}

/// Log a message at the given level.
///
/// # Examples
///
/// ```
/// # use rust_log_pipeline::prelude::*;
/// # let logger = Logger::new("app");
/// use rust_log_pipeline::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let mut __capture = $crate::LogCapturer::new(
            &$logger,
            $level,
            ::std::file!(),
            $crate::__function_name!(),
            ::std::line!(),
        );
        // Writing into the capturer cannot fail.
        let _ = ::std::fmt::Write::write_fmt(&mut __capture, ::std::format_args!($($arg)+));
    }};
}

/// Log a trace-level message.
///
/// ```
/// # use rust_log_pipeline::prelude::*;
/// # let logger = Logger::new("app");
/// use rust_log_pipeline::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($fmt:literal $($arg:tt)*) => {
        $crate::log!($crate::Logger::global(), $crate::LogLevel::Trace, $fmt $($arg)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// ```
/// # use rust_log_pipeline::prelude::*;
/// # let logger = Logger::new("app");
/// use rust_log_pipeline::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($fmt:literal $($arg:tt)*) => {
        $crate::log!($crate::Logger::global(), $crate::LogLevel::Debug, $fmt $($arg)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($fmt:literal $($arg:tt)*) => {
        $crate::log!($crate::Logger::global(), $crate::LogLevel::Info, $fmt $($arg)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// ```
/// # use rust_log_pipeline::prelude::*;
/// # let logger = Logger::new("app");
/// use rust_log_pipeline::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($fmt:literal $($arg:tt)*) => {
        $crate::log!($crate::Logger::global(), $crate::LogLevel::Warn, $fmt $($arg)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($fmt:literal $($arg:tt)*) => {
        $crate::log!($crate::Logger::global(), $crate::LogLevel::Error, $fmt $($arg)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{ChannelConfig, LogChannel, LogEvent, LogLevel, Logger, Result};
    use parking_lot::Mutex;
    use std::sync::Arc;

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
            if self.config.accepts(event.level) {
                self.events.lock().push(event.clone());
            }
            Ok(())
        }
    }

    fn collecting_logger() -> (Logger, Arc<Mutex<Vec<LogEvent>>>) {
        let logger = Logger::new("macros");
        let events = Arc::new(Mutex::new(Vec::new()));
        logger.add_channel(Collect {
            config: ChannelConfig::new("collect", LogLevel::Trace),
            events: Arc::clone(&events),
        });
        (logger, events)
    }

    #[test]
    fn test_level_macros() {
        let (logger, events) = collecting_logger();
        trace!(logger, "t");
        debug!(logger, "d {}", 1);
        info!(logger, "i {} {}", 1, 2);
        warn!(logger, "w");
        error!(logger, "e {value}", value = "named");

        let events = events.lock();
        let levels: Vec<LogLevel> = events.iter().map(|e| e.level).collect();
        assert_eq!(levels, LogLevel::ALL.to_vec());
        assert_eq!(events[1].message, "d 1");
        assert_eq!(events[2].message, "i 1 2");
        assert_eq!(events[4].message, "e named");
    }

    #[test]
    fn test_call_site_is_captured() {
        let (logger, events) = collecting_logger();
        let line = line!() + 1;
        info!(logger, "located");

        let events = events.lock();
        assert_eq!(events[0].file, "macros.rs");
        assert_eq!(events[0].line, line);
        assert_eq!(events[0].function, "test_call_site_is_captured");
    }

    #[test]
    fn test_function_name_inside_closure() {
        let (logger, events) = collecting_logger();
        let run = || info!(logger, "from closure");
        run();
        assert_eq!(events.lock()[0].function, "test_function_name_inside_closure");
    }

    #[test]
    fn test_logger_behind_arc() {
        let (logger, events) = collecting_logger();
        let logger = Arc::new(logger);
        warn!(logger, "through arc");
        assert_eq!(events.lock()[0].message, "through arc");
    }

    #[test]
    fn test_global_form_compiles_and_runs() {
        // The global logger has no channels here; this only checks dispatch.
        info!("global {}", 1);
        error!("global without args");
    }
}
