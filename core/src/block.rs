//! Scoped timing of arbitrary code blocks.
//!
//! ```
//! let guard = time_executioner::time("load_fixtures");
//! // ... work ...
//! drop(guard); // logs "time_execute.load_fixtures executed in 0.000 seconds"
//! ```

use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use crate::error::Result;
use crate::level::Level;
use crate::logger::Execution;
use crate::logger::Extra;
use crate::logger::Logger;
use crate::options::TimingOptions;
use crate::registry;
use crate::timing::format_seconds;

/// Owner recorded for every timed block; also the message prefix.
pub const BLOCK_OWNER: &str = "time_execute";

/// Start timing a block at [`Level::Info`].
pub fn time(label: impl Into<String>) -> BlockTimer {
    BlockTimer::start(label)
}

/// Start timing a block at the named level.
///
/// The level is validated before the clock starts; an unknown name is an
/// error.
pub fn time_with_level(label: impl Into<String>, log_level: &str) -> Result<BlockTimer> {
    let level: Level = log_level.parse()?;
    Ok(BlockTimer::start(label).level(level))
}

pub fn time_with_options(label: impl Into<String>, options: &TimingOptions) -> BlockTimer {
    let mut timer = BlockTimer::start(label).level(options.log_level);
    timer.extra.extend(options.extra.clone());
    timer
}

/// Guard that logs the time since it was created when dropped.
///
/// Drop runs on every way out of the scope: falling off the end, `return`,
/// `?`, and unwinding from a panic. The panic keeps propagating after the
/// line is logged.
#[must_use = "the block is only timed while this guard is alive"]
pub struct BlockTimer {
    label: String,
    level: Level,
    extra: Extra,
    logger: Option<Arc<dyn Logger>>,
    start: Instant,
    stopped: bool,
}

impl BlockTimer {
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            level: Level::default(),
            extra: Extra::new(),
            logger: None,
            start: Instant::now(),
            stopped: false,
        }
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.extra.insert(key.into(), value.to_string());
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// End the block now. Logs like a drop would and returns the same elapsed
    /// time that was written to the line.
    pub fn stop(mut self) -> Duration {
        let elapsed = self.start.elapsed();
        self.stopped = true;
        self.emit(elapsed);
        elapsed
    }

    fn emit(&self, elapsed: Duration) {
        let message = format!(
            "{BLOCK_OWNER}.{} executed in {} seconds",
            self.label,
            format_seconds(elapsed)
        );
        let execution = Execution {
            function_name: &self.label,
            class_name: BLOCK_OWNER,
            execution_time: elapsed.as_secs_f64(),
            is_async: Some(false),
            error: None,
            extra: &self.extra,
        };
        registry::resolve(self.logger.as_ref()).log(self.level, &message, &execution);
    }
}

impl Drop for BlockTimer {
    fn drop(&mut self) {
        if !self.stopped {
            self.emit(self.start.elapsed());
        }
    }
}
