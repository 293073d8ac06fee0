//! Console Logger
//!
//! `log` backend for the admin UI. Lines go to the browser console on
//! wasm32 and to stderr elsewhere. The most recent lines are also kept in a
//! circular buffer so the UI can show them.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

pub const DEFAULT_CAPACITY: usize = 200;

pub struct ConsoleLogger {
    level: LevelFilter,
    capacity: usize,
    recent: Mutex<VecDeque<String>>,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter, capacity: usize) -> Self {
        Self {
            level,
            capacity: capacity.max(1),
            recent: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
        }
    }

    /// Buffered lines, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        match self.recent.lock() {
            Ok(buf) => buf.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    fn remember(&self, line: &str) {
        if let Ok(mut buf) = self.recent.lock() {
            if buf.len() == self.capacity {
                buf.pop_front();
            }
            buf.push_back(line.to_string());
        }
    }
}

fn format_line(record: &Record) -> String {
    format!(
        "[{}] {:<5} {}: {}",
        chrono::Utc::now().format("%H:%M:%S%.3f"),
        record.level(),
        record.target(),
        record.args()
    )
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    use web_sys::console;
    let value = web_sys::wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => console::error_1(&value),
        Level::Warn => console::warn_1(&value),
        Level::Info => console::info_1(&value),
        Level::Debug | Level::Trace => console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{}", line);
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record);
        emit(record.level(), &line);
        self.remember(&line);
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<ConsoleLogger> = OnceLock::new();

/// Install the global logger. Errors if another logger is already set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| ConsoleLogger::new(level, DEFAULT_CAPACITY));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Lines buffered by the global logger; empty before `init`
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(ConsoleLogger::recent_lines).unwrap_or_default()
}
