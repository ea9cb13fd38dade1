//! Run-wide logging setup.
//!
//! Everything in the crate logs through the `log` macros. [`init`] installs
//! the backend once per process: records go to stderr and to a daily file
//! under the logs directory, formatted as
//! `YYYY-MM-DD HH:MM:SS - target - LEVEL - message`.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Once;

use chrono::{Local, NaiveDate};
use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;

use crate::support::Settings;

static INIT: Once = Once::new();

/// `test_execution_<YYYY-MM-DD>.log`
pub fn log_file_name(date: NaiveDate) -> String {
    format!("test_execution_{}.log", date.format("%Y-%m-%d"))
}

/// Install the logger under the configured reports directory.
pub fn init() {
    init_in(&Settings::from_env().logs_dir());
}

/// Install the logger, writing the daily file into `logs_dir`.
/// Only the first call in a process has any effect.
pub fn init_in(logs_dir: &Path) {
    INIT.call_once(|| {
        let path = logs_dir.join(log_file_name(Local::now().date_naive()));
        let file = match open_log_file(logs_dir, &path) {
            Ok(f) => Some(f),
            Err(e) => {
                eprintln!("could not open log file {}: {}", path.display(), e);
                None
            }
        };

        let result = Builder::new()
            .filter_level(LevelFilter::Info)
            .parse_default_env()
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{} - {} - {} - {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S"),
                    record.target(),
                    record.level(),
                    record.args()
                )
            })
            .write_style(WriteStyle::Never)
            .target(Target::Pipe(Box::new(TeeWriter { file })))
            .try_init();

        if let Err(e) = result {
            eprintln!("logger already installed: {}", e);
        }
    });
}

fn open_log_file(dir: &Path, path: &Path) -> io::Result<File> {
    fs::create_dir_all(dir)?;
    OpenOptions::new().create(true).append(true).open(path)
}

/// Copies every record to stderr and, when available, the log file.
struct TeeWriter {
    file: Option<File>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        if let Some(file) = self.file.as_mut() {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_carries_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(log_file_name(date), "test_execution_2024-03-09.log");
    }

    #[test]
    fn init_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        init_in(dir.path());
        init_in(dir.path());
        log::info!(target: "logger_test", "logger ready");
        log::logger().flush();

        let path = dir.path().join(log_file_name(Local::now().date_naive()));
        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(contents.matches("logger ready").count(), 1);
        assert!(contents.contains(" - logger_test - INFO - logger ready"));
    }
}
