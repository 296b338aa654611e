use std::sync::{Mutex, OnceLock};

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::config::PROGRAM_LOG_LEVEL;

const DEFAULT_LEVEL: Level = Level::Warn;

enum LogTarget {
    Stderr,
    /// Captured lines, used by tests.
    #[cfg_attr(not(test), allow(dead_code))]
    Memory(Mutex<Vec<String>>),
}

pub struct Logger {
    level: Level,
    target: LogTarget,
}

impl Logger {
    fn format_line(record: &Record<'_>) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        format!(
            "{} {:<5} [{}] {}",
            timestamp,
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = Self::format_line(record);
        match &self.target {
            LogTarget::Stderr => eprintln!("{line}"),
            LogTarget::Memory(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push(line);
                }
            }
        }
    }

    fn flush(&self) {}
}

fn parse_level(raw: Option<&str>) -> Level {
    raw.and_then(|s| s.trim().parse::<LevelFilter>().ok())
        .and_then(|filter| filter.to_level())
        .unwrap_or(DEFAULT_LEVEL)
}

fn get_level_from_env() -> Level {
    parse_level(std::env::var(PROGRAM_LOG_LEVEL).ok().as_deref())
}

/// Install the stderr logger at the level named by `SHELF_LOG_LEVEL`.
pub fn init() -> Result<(), SetLoggerError> {
    init_with_level(get_level_from_env())
}

/// Install the stderr logger at an explicit level.
///
/// Only the first call installs a logger; later calls are no-ops.
pub fn init_with_level(level: Level) -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<Logger> = OnceLock::new();

    // `get_or_init` ignores `level` after the first call, so the max level
    // must only be set alongside the logger itself.
    let init_call = LOGGER.get().is_none();

    let logger = LOGGER.get_or_init(|| Logger {
        level,
        target: LogTarget::Stderr,
    });

    if init_call {
        log::set_logger(logger)?;
        log::set_max_level(level.to_level_filter());
    }

    Ok(())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
