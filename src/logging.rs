// this_file: src/logging.rs
//! Stderr logging for the CLI

use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;
use std::time::Instant;

/// Initialize stderr logging. `RUST_LOG` filters override `level`;
/// `quiet` pins the level to errors.
pub fn init_logging(level: &str, quiet: bool) {
    let level_filter = if quiet {
        LevelFilter::Error
    } else {
        parse_level(level).unwrap_or_else(|| {
            eprintln!("Invalid log level '{level}', using 'info'");
            LevelFilter::Info
        })
    };

    let mut builder = Builder::new();
    builder.filter_level(level_filter).format(|buf, record| {
        writeln!(
            buf,
            "{} {}{:5}\x1b[0m [{}] {}",
            buf.timestamp_millis(),
            level_color(record.level()),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    // A second init (tests, embedding callers) keeps the first logger
    let _ = builder.try_init();
}

fn level_color(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1b[31m",
        Level::Warn => "\x1b[33m",
        Level::Info => "\x1b[32m",
        Level::Debug => "\x1b[34m",
        Level::Trace => "\x1b[35m",
    }
}

/// Parse a level name; `None` for unknown names.
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.to_lowercase().as_str() {
        "trace" => Some(LevelFilter::Trace),
        "debug" => Some(LevelFilter::Debug),
        "info" => Some(LevelFilter::Info),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "error" => Some(LevelFilter::Error),
        "off" => Some(LevelFilter::Off),
        _ => None,
    }
}

/// Logs the elapsed time of a named operation at debug level when dropped.
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        log::debug!("Starting: {name}");
        Self {
            name,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        log::debug!(
            "{} completed in {:.3}ms",
            self.name,
            self.start.elapsed().as_secs_f64() * 1000.0
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("WARNING"), Some(LevelFilter::Warn));
        assert_eq!(parse_level("trace"), Some(LevelFilter::Trace));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_level_colors_differ() {
        assert_ne!(level_color(Level::Error), level_color(Level::Warn));
        assert_eq!(level_color(Level::Info), "\x1b[32m");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging("info", true);
        init_logging("debug", false);
        let _timer = Timer::new("render batch");
    }
}
