//! File logger for the `log` facade.
//!
//! The terminal belongs to the game, so records go to the file named by
//! `ARCADE_LOG_PATH`, one line each.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};

pub struct FileLogger {
    level: LevelFilter,
    out: Mutex<File>,
}

impl FileLogger {
    pub fn open(path: &Path, level: LevelFilter) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open log file {}", path.display()))?;
        Ok(Self {
            level,
            out: Mutex::new(file),
        })
    }
}

/// `<unix-millis> <LEVEL> <target>: <message>`
pub fn format_record(millis: u128, record: &Record) -> String {
    format!(
        "{} {:<5} {}: {}\n",
        millis,
        record.level(),
        record.target(),
        record.args()
    )
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let line = format_record(millis, record);
        if let Ok(mut out) = self.out.lock() {
            let _ = out.write_all(line.as_bytes());
        }
    }

    fn flush(&self) {
        if let Ok(mut out) = self.out.lock() {
            let _ = out.flush();
        }
    }
}

/// Install the file logger as the global `log` backend.
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    let logger = FileLogger::open(path, level)?;
    log::set_boxed_logger(Box::new(logger)).context("a logger is already installed")?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn test_record_format() {
        let line = format_record(
            12,
            &Record::builder()
                .args(format_args!("shell ready"))
                .level(Level::Info)
                .target("tui_arcade_shell")
                .build(),
        );
        assert_eq!(line, "12 INFO  tui_arcade_shell: shell ready\n");
    }

    #[test]
    fn test_level_filter_and_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arcade.log");
        let logger = FileLogger::open(&path, LevelFilter::Warn).unwrap();

        logger.log(
            &Record::builder()
                .args(format_args!("store write failed"))
                .level(Level::Warn)
                .target("store")
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("tick"))
                .level(Level::Debug)
                .target("ticker")
                .build(),
        );
        logger.flush();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("WARN  store: store write failed"));
        assert!(!text.contains("tick"));
    }
}
