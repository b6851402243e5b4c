//! Process-wide logger slot.
//!
//! Timers read the slot each time they emit, so a [`set_logger`] call is
//! visible to every line logged after it, including lines of calls that were
//! already in flight when it happened.

use std::sync::Arc;
use std::sync::LazyLock;
use std::sync::PoisonError;
use std::sync::RwLock;

use crate::logger::Logger;
use crate::logger::TracingLogger;

/// Replaceable holder for the active [`Logger`].
pub struct LoggerSlot {
    current: RwLock<Arc<dyn Logger>>,
}

impl Default for LoggerSlot {
    fn default() -> Self {
        Self::new(Arc::new(TracingLogger))
    }
}

impl LoggerSlot {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            current: RwLock::new(logger),
        }
    }

    /// The logger in place right now.
    pub fn get(&self) -> Arc<dyn Logger> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn set(&self, logger: Arc<dyn Logger>) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = logger;
    }

    /// Put the default [`TracingLogger`] back.
    pub fn reset(&self) {
        self.set(Arc::new(TracingLogger));
    }
}

static GLOBAL: LazyLock<LoggerSlot> = LazyLock::new(LoggerSlot::default);

/// Route all subsequent timing lines through `logger`.
pub fn set_logger<L: Logger + 'static>(logger: L) {
    GLOBAL.set(Arc::new(logger));
}

/// Like [`set_logger`], for a logger the caller keeps a handle to.
pub fn set_shared_logger(logger: Arc<dyn Logger>) {
    GLOBAL.set(logger);
}

pub fn current_logger() -> Arc<dyn Logger> {
    GLOBAL.get()
}

/// Restore the default [`TracingLogger`].
pub fn reset_logger() {
    GLOBAL.reset();
}

/// Logger a timer should emit through: its own override, else the global one.
pub(crate) fn resolve(override_logger: Option<&Arc<dyn Logger>>) -> Arc<dyn Logger> {
    match override_logger {
        Some(logger) => Arc::clone(logger),
        None => current_logger(),
    }
}
