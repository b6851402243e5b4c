//! Recording logger shared by the unit tests.

use std::sync::Arc;
use std::sync::Mutex;

use crate::level::Level;
use crate::logger::Execution;
use crate::logger::Extra;
use crate::logger::Logger;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Entry {
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

#[derive(Clone, Default)]
pub(crate) struct RecordingLogger {
    inner: Arc<Mutex<Recorded>>,
}

impl RecordingLogger {
    pub fn shared(&self) -> Arc<dyn Logger> {
        Arc::new(self.clone())
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.inner.lock().unwrap().entries.clone()
    }

    /// Severity methods invoked, in order.
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
        let entry = Entry {
            level,
            message: message.to_string(),
            function_name: execution.function_name.to_string(),
            class_name: execution.class_name.to_string(),
            execution_time: execution.execution_time,
            is_async: execution.is_async,
            error: execution.error.map(str::to_string),
            extra: execution.extra.clone(),
        };
        self.inner.lock().unwrap().entries.push(entry);
        level.dispatch(self, message);
    }
}
