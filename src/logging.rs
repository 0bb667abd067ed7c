//! File logger behind the `log` facade.
//!
//! The TUI owns stdout and stderr, so records go to a file instead:
//! `--log-file` if given, otherwise `diffbench.log` in the temp directory.
//!
//! Each record is one line: `[timestamp] [LEVEL] [target] message`.

use crate::error::Result;
use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default log file location.
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("diffbench.log")
}

fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string()
}

/// Appends formatted records to a file.
pub struct FileLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl FileLogger {
    /// Open (truncating) `path` and write a session header.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn open(path: &Path, level: LevelFilter) -> Result<Self> {
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(path)?;
        writeln!(
            file,
            "{}\ndiffbench session started at {} (level={level})\n{}",
            "=".repeat(80),
            timestamp(),
            "=".repeat(80)
        )?;
        Ok(Self {
            level,
            file: Mutex::new(file),
        })
    }

    fn format(record: &Record<'_>) -> String {
        format!(
            "[{}] [{:<5}] [{}] {}\n",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format(record);
        let mut file = self.file.lock();
        let _ = file.write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = self.file.lock().flush();
    }
}

/// Install a [`FileLogger`] as the global logger.
///
/// Does nothing when `level` is `Off`.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a logger is
/// already installed.
pub fn init(path: Option<&Path>, level: LevelFilter) -> Result<()> {
    if level == LevelFilter::Off {
        return Ok(());
    }
    let path = path.map_or_else(default_log_path, Path::to_path_buf);
    let logger = FileLogger::open(&path, level)?;
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(())
}
