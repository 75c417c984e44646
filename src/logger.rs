//! Custom logging module.
//!
//! This module provides a logger implementation that formats log entries with
//! a timestamp and forwards them to a callback, stderr unless replaced, so
//! they never interleave with the rendered view on stdout.

use crate::error::{AppError, AppResult};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Logger that hands formatted records at or above its level to a callback
///
pub struct CustomLogger {
    level: LevelFilter,
    log_callback: Arc<Mutex<Option<Box<dyn Fn(String) + Send + Sync>>>>,
}

impl CustomLogger {
    pub fn new(level: LevelFilter) -> Self {
        CustomLogger {
            level,
            log_callback: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_log_callback(&self, callback: Box<dyn Fn(String) + Send + Sync>) {
        if let Ok(mut guard) = self.log_callback.lock() {
            *guard = Some(callback);
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(callback) = self.log_callback.lock() {
                if let Some(ref cb) = *callback {
                    cb(format_log(record));
                }
            }
        }
    }

    fn flush(&self) {}
}

/// Parse a level name such as `info` or `debug`.
///
pub fn parse_level(level: &str) -> AppResult<LevelFilter> {
    level
        .parse::<LevelFilter>()
        .map_err(|_| AppError::Logger(format!("unknown log level '{}'", level)))
}

/// Install the global logger, writing to stderr.
///
pub fn init(level: &str) -> AppResult<()> {
    let filter = parse_level(level)?;
    let logger = CustomLogger::new(filter);
    logger.set_log_callback(Box::new(|line: String| eprintln!("{}", line)));
    log::set_boxed_logger(Box::new(logger)).map_err(|e| AppError::Logger(e.to_string()))?;
    log::set_max_level(filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(level: LevelFilter) -> (CustomLogger, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&lines);
        let logger = CustomLogger::new(level);
        logger.set_log_callback(Box::new(move |line: String| sink.lock().unwrap().push(line)));
        (logger, lines)
    }

    #[test]
    fn forwards_enabled_records() {
        let (logger, lines) = capture(LevelFilter::Info);
        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .args(format_args!("probe failed"))
                .build(),
        );
        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("WARN probe failed"));
    }

    #[test]
    fn drops_records_below_level() {
        let (logger, lines) = capture(LevelFilter::Info);
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .args(format_args!("state: initial -> loading"))
                .build(),
        );
        assert!(lines.lock().unwrap().is_empty());
    }

    #[test]
    fn parses_levels() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level("OFF").unwrap(), LevelFilter::Off);
        assert!(matches!(parse_level("loud"), Err(AppError::Logger(_))));
    }
}
