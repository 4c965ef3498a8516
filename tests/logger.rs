extern crate chalk;
extern crate log;

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use log::{Level, LevelFilter, Log, Record};

use chalk::utils::logger::BufferedLogger;

#[derive(Clone, Default)]
struct Sink(Arc<Mutex<Vec<u8>>>);

impl Sink {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn log(logger: &BufferedLogger, level: Level, message: &str) {
    logger.log(
        &Record::builder()
            .level(level)
            .target("chalk")
            .args(format_args!("{}", message))
            .build(),
    );
}

#[test]
fn buffered_until_flush() {
    let sink = Sink::default();
    let logger = BufferedLogger::with_sink(LevelFilter::Info, sink.clone());

    log(&logger, Level::Info, "device created");
    assert!(sink.text().is_empty());
    assert!(logger.buffered_len() > 0);

    logger.flush();
    assert!(sink.text().contains("(INFO)"));
    assert!(sink.text().contains("device created"));
    assert_eq!(logger.buffered_len(), 0);
}

#[test]
fn level_filter() {
    let sink = Sink::default();
    let logger = BufferedLogger::with_sink(LevelFilter::Warn, sink.clone());

    log(&logger, Level::Info, "ignored");
    log(&logger, Level::Debug, "ignored");
    assert_eq!(logger.buffered_len(), 0);
}

#[test]
fn errors_flush_immediately() {
    let sink = Sink::default();
    let logger = BufferedLogger::with_sink(LevelFilter::Trace, sink.clone());

    log(&logger, Level::Warn, "first");
    log(&logger, Level::Error, "second");

    let text = sink.text();
    assert!(text.contains("first"));
    assert!(text.contains("second"));
    assert_eq!(logger.buffered_len(), 0);
}

#[test]
fn capacity() {
    let sink = Sink::default();
    let logger = BufferedLogger::with_sink(LevelFilter::Info, sink.clone());
    logger.set_capacity(64);

    log(&logger, Level::Info, "a");
    assert!(sink.text().is_empty());

    log(&logger, Level::Info, &"x".repeat(64));
    assert!(!sink.text().is_empty());
    assert_eq!(logger.buffered_len(), 0);
}

#[test]
fn multiline_and_unbuffered() {
    let sink = Sink::default();
    let logger = BufferedLogger::with_sink(LevelFilter::Info, sink.clone());
    logger.set_buffered(false);

    log(&logger, Level::Info, "line one\nline two\n");
    let text = sink.text();
    assert_eq!(text.lines().count(), 2);
    assert!(text.lines().all(|v| v.contains("(INFO)")));
}
