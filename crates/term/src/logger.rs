//! JSON-lines file logger.
//!
//! The terminal owns stdout and stderr while the game runs, so log records go
//! to a file instead, one JSON object per line.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};
use serde::Serialize;

#[derive(Serialize)]
struct LogLine<'a> {
    ts_ms: u64,
    level: &'a str,
    target: &'a str,
    msg: String,
}

pub struct FileLogger {
    file: Mutex<File>,
    level: LevelFilter,
}

impl FileLogger {
    pub fn open(path: &Path, level: LevelFilter) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        Ok(Self {
            file: Mutex::new(file),
            level,
        })
    }

    /// Install as the global logger
    pub fn install(self) -> Result<()> {
        let level = self.level;
        log::set_logger(Box::leak(Box::new(self)))
            .map_err(|err| anyhow::anyhow!("logger already installed: {}", err))?;
        log::set_max_level(level);
        Ok(())
    }

    fn encode(record: &Record) -> Option<Vec<u8>> {
        let ts_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let line = LogLine {
            ts_ms,
            level: record.level().as_str(),
            target: record.target(),
            msg: record.args().to_string(),
        };
        let mut buf = serde_json::to_vec(&line).ok()?;
        buf.push(b'\n');
        Some(buf)
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Some(buf) = Self::encode(record) else {
            return;
        };
        if let Ok(mut file) = self.file.lock() {
            let _ = file.write_all(&buf);
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_one_json_line() {
        let buf = FileLogger::encode(
            &Record::builder()
                .args(format_args!("level {} passed", 2))
                .level(log::Level::Info)
                .target("handset_tetris_core::session")
                .build(),
        )
        .unwrap();
        assert_eq!(buf.last(), Some(&b'\n'));

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["level"], "INFO");
        assert_eq!(value["msg"], "level 2 passed");
    }
}
