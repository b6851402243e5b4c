//! Logging capability consumed by the timers, and the default `tracing` sink.

use std::collections::BTreeMap;

use crate::level::Level;

/// Target every event of [`TracingLogger`] is emitted under.
pub const LOGGER_TARGET: &str = "time_executioner";

/// Caller-supplied key/value pairs attached to a timing line.
pub type Extra = BTreeMap<String, String>;

/// Sink for timing lines.
///
/// Implementors only need the five severity methods. [`Logger::log`] is the
/// entry point the timers use; override it to consume the structured
/// [`Execution`] payload as well as the rendered message.
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
    fn critical(&self, message: &str);

    fn log(&self, level: Level, message: &str, execution: &Execution<'_>) {
        let _ = execution;
        level.dispatch(self, message);
    }
}

/// Structured description of one timed execution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Execution<'a> {
    /// Function name, or the label of a timed block.
    pub function_name: &'a str,
    /// Receiver type for methods, `time_execute` for blocks, empty otherwise.
    pub class_name: &'a str,
    /// Elapsed wall-clock time in seconds.
    pub execution_time: f64,
    pub is_async: Option<bool>,
    /// Rendered error when the timed call returned `Err`.
    pub error: Option<&'a str>,
    pub extra: &'a Extra,
}

/// Default logger: forwards every line to `tracing` under [`LOGGER_TARGET`].
///
/// `tracing` has no critical level, so [`Level::Critical`] is emitted at
/// `ERROR` and told apart by the `severity` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

macro_rules! emit {
    ($level:expr, $severity:literal, $message:expr) => {
        ::tracing::event!(
            target: LOGGER_TARGET,
            $level,
            severity = $severity,
            "{}",
            $message
        )
    };
    ($level:expr, $severity:literal, $message:expr, $execution:expr) => {
        ::tracing::event!(
            target: LOGGER_TARGET,
            $level,
            severity = $severity,
            function_name = $execution.function_name,
            class_name = $execution.class_name,
            execution_time = $execution.execution_time,
            is_async = $execution.is_async,
            error = $execution.error,
            extra = ?$execution.extra,
            "{}",
            $message
        )
    };
}

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        emit!(::tracing::Level::DEBUG, "debug", message);
    }

    fn info(&self, message: &str) {
        emit!(::tracing::Level::INFO, "info", message);
    }

    fn warning(&self, message: &str) {
        emit!(::tracing::Level::WARN, "warning", message);
    }

    fn error(&self, message: &str) {
        emit!(::tracing::Level::ERROR, "error", message);
    }

    fn critical(&self, message: &str) {
        emit!(::tracing::Level::ERROR, "critical", message);
    }

    fn log(&self, level: Level, message: &str, execution: &Execution<'_>) {
        match level {
            Level::Debug => emit!(::tracing::Level::DEBUG, "debug", message, execution),
            Level::Info => emit!(::tracing::Level::INFO, "info", message, execution),
            Level::Warning => emit!(::tracing::Level::WARN, "warning", message, execution),
            Level::Error => emit!(::tracing::Level::ERROR, "error", message, execution),
            Level::Critical => emit!(::tracing::Level::ERROR, "critical", message, execution),
        }
    }
}
