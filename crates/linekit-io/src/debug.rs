//! Debug logging to a file.
//!
//! While the terminal is in raw mode stderr shares the screen with the editor,
//! so log records go to a file instead. Logging is off unless `LINEKIT_DEBUG`
//! is set to `1` or `true`.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, Once};

use log::{LevelFilter, Log, Metadata, Record};

pub const ENV_ENABLE_LOG: &str = "LINEKIT_DEBUG";

static INIT: Once = Once::new();
static LOGGER: FileLogger = FileLogger {
    file: Mutex::new(None),
};

struct FileLogger {
    file: Mutex<Option<File>>,
}

impl Log for FileLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut guard) = self.file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = writeln!(file, "{}", format_record(record));
                let _ = file.flush(); // Immediately flush
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

fn format_record(record: &Record) -> String {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!(
        "[{timestamp}] {:<5} {}: {}",
        record.level(),
        record.target(),
        record.args()
    )
}

/// Whether an environment value turns logging on.
pub fn is_enabled_value(value: &str) -> bool {
    value == "1" || value == "true"
}

fn log_path() -> &'static str {
    if Path::new("tmp").exists() {
        "tmp/linekit-debug.log"
    } else {
        "/tmp/linekit-debug.log"
    }
}

/// Install the file logger if `LINEKIT_DEBUG` asks for it.
///
/// Safe to call more than once; only the first call does anything. Returns
/// whether logging is active.
pub fn init_logger() -> bool {
    INIT.call_once(|| {
        let enabled = std::env::var(ENV_ENABLE_LOG)
            .map(|value| is_enabled_value(&value))
            .unwrap_or(false);
        if !enabled {
            return;
        }

        let path = log_path();
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                if let Ok(mut guard) = LOGGER.file.lock() {
                    *guard = Some(file);
                }
                if log::set_logger(&LOGGER).is_ok() {
                    log::set_max_level(LevelFilter::Trace);
                    eprintln!("linekit debug log enabled: {path}");
                }
            }
            Err(e) => {
                eprintln!("Failed to open debug log file {path}: {e}");
            }
        }
    });

    LOGGER.file.lock().map(|guard| guard.is_some()).unwrap_or(false)
}
