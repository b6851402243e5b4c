//! Shared helpers for the integration tests.
#![allow(dead_code)]

use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

use time_executioner::Execution;
use time_executioner::Extra;
use time_executioner::Level;
use time_executioner::Logger;
use tracing_subscriber::fmt::writer::MakeWriter;

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub level: Level,
    pub message: String,
    pub function_name: String,
    pub class_name: String,
    pub execution_time: f64,
    pub is_async: Option<bool>,
    pub error: Option<String>,
    pub extra: Extra,
}

#[derive(Default)]
struct Recorded {
    entries: Vec<Entry>,
    capabilities: Vec<&'static str>,
}

/// Test double that remembers every line and which severity method got it.
#[derive(Clone, Default)]
pub struct RecordingLogger {
    inner: Arc<Mutex<Recorded>>,
}

impl RecordingLogger {
    /// Fresh logger, installed as the process-wide one.
    pub fn install() -> Self {
        let logger = Self::default();
        time_executioner::set_shared_logger(Arc::new(logger.clone()));
        logger
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.inner.lock().unwrap().entries.clone()
    }

    pub fn single(&self) -> Entry {
        let entries = self.entries();
        assert_eq!(entries.len(), 1, "expected exactly one line: {entries:#?}");
        entries[0].clone()
    }

    pub fn capabilities(&self) -> Vec<&'static str> {
        self.inner.lock().unwrap().capabilities.clone()
    }

    fn called(&self, capability: &'static str) {
        self.inner.lock().unwrap().capabilities.push(capability);
    }
}

impl Logger for RecordingLogger {
    fn debug(&self, _message: &str) {
        self.called("debug");
    }
    fn info(&self, _message: &str) {
        self.called("info");
    }
    fn warning(&self, _message: &str) {
        self.called("warning");
    }
    fn error(&self, _message: &str) {
        self.called("error");
    }
    fn critical(&self, _message: &str) {
        self.called("critical");
    }

    fn log(&self, level: Level, message: &str, execution: &Execution<'_>) {
        self.inner.lock().unwrap().entries.push(Entry {
            level,
            message: message.to_string(),
            function_name: execution.function_name.to_string(),
            class_name: execution.class_name.to_string(),
            execution_time: execution.execution_time,
            is_async: execution.is_async,
            error: execution.error.map(str::to_string),
            extra: execution.extra.clone(),
        });
        level.dispatch(self, message);
    }
}

/// Buffer that `tracing_subscriber::fmt` writes formatted events into.
#[derive(Clone, Default)]
pub struct CapturedOutput {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
    }
}

pub struct CapturedWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self.buf.lock().map_err(|_| io::ErrorKind::Other)?;
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedOutput {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter {
            buf: self.buf.clone(),
        }
    }
}

/// Run `f` with a thread-local `fmt` subscriber and return what it printed.
pub fn capture_tracing(f: impl FnOnce()) -> String {
    let output = CapturedOutput::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(output.clone())
        .with_ansi(false)
        .without_time()
        .with_max_level(tracing::Level::TRACE)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    output.contents()
}
