//! A buffered `log` backend.
//!
//! Records are formatted into a single mutex-guarded text buffer which is
//! written out to the sink when it grows past its capacity, when an error is
//! logged, when buffering is turned off, or when `log::logger().flush()` is
//! called.
//!
//! Lines are stamped with the time of day in UTC. The local time zone of the
//! host is never looked up.

use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

pub const DEFAULT_CAPACITY: usize = 5000;

struct LoggerState {
    buffer: String,
    capacity: usize,
    buffered: bool,
    sink: Box<dyn Write + Send>,
}

impl LoggerState {
    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        // There is nowhere left to report a failing sink.
        let _ = self.sink.write_all(self.buffer.as_bytes());
        let _ = self.sink.flush();
        self.buffer.clear();
    }
}

pub struct BufferedLogger {
    level: LevelFilter,
    state: Mutex<LoggerState>,
}

impl BufferedLogger {
    /// Creates a logger writing to the standard error stream.
    pub fn new(level: LevelFilter) -> Self {
        BufferedLogger::with_sink(level, io::stderr())
    }

    pub fn with_sink<W>(level: LevelFilter, sink: W) -> Self
    where
        W: Write + Send + 'static,
    {
        let state = LoggerState {
            buffer: String::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
            buffered: true,
            sink: Box::new(sink),
        };

        BufferedLogger {
            level,
            state: Mutex::new(state),
        }
    }

    /// Sets the number of buffered characters that triggers a write to the sink.
    pub fn set_capacity(&self, capacity: usize) {
        let mut state = self.state.lock().unwrap();
        state.capacity = capacity;
        if state.buffer.len() >= capacity {
            state.flush();
        }
    }

    /// Turns buffering on or off. Unbuffered loggers write every record out
    /// immediately.
    pub fn set_buffered(&self, buffered: bool) {
        let mut state = self.state.lock().unwrap();
        state.buffered = buffered;
        if !buffered {
            state.flush();
        }
    }

    /// Returns the number of characters waiting to be written out.
    pub fn buffered_len(&self) -> usize {
        self.state.lock().unwrap().buffer.len()
    }
}

impl Log for BufferedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let time = timestamp();
        let level = format!("({})", record.level());
        let message = format!("{}", record.args());

        let mut state = self.state.lock().unwrap();
        for line in message.split(|c| c == '\n' || c == '\r') {
            if line.is_empty() {
                continue;
            }

            state.buffer.push_str(&format!("[{}] {:<10} {}\n", time, level, line));
        }

        if !state.buffered
            || state.buffer.len() >= state.capacity
            || record.level() == log::Level::Error
        {
            state.flush();
        }
    }

    fn flush(&self) {
        self.state.lock().unwrap().flush();
    }
}

/// Installs a `BufferedLogger` writing to the standard error stream as the
/// global logger.
pub fn setup(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(BufferedLogger::new(level)))?;
    log::set_max_level(level);
    Ok(())
}

/// Wall-clock time of day as `hh:mm:ss`, in UTC.
fn timestamp() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|v| v.as_secs())
        .unwrap_or(0)
        % 86_400;

    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn timestamp_format() {
        let time = timestamp();
        let fields: Vec<u32> = time.split(':').map(|v| v.parse().unwrap()).collect();

        assert_eq!(time.len(), 8);
        assert_eq!(fields.len(), 3);
        assert!(fields[0] < 24 && fields[1] < 60 && fields[2] < 60);
    }
}
