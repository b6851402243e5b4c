//! Timed calls: the runtime behind `#[timed]`.
//!
//! A [`Timing`] names a call and carries its severity. It runs the call
//! through one of two variants, picked once by the caller (or by the
//! attribute macro from the function signature):
//!
//! - [`Timing::call`] / [`Timing::try_call`] for plain closures,
//! - [`Timing::call_async`] / [`Timing::try_call_async`] for futures; the
//!   clock runs across every suspension until the future resolves.
//!
//! The `try_*_with` forms take the error renderer as an argument, so they
//! work for error types without `Display`; `#[timed]` passes
//! [`error_text!`](crate::error_text).
//!
//! Exactly one line is logged per call:
//!
//! - `"{name}() executed in {elapsed} seconds"` at the configured level when
//!   the call returns,
//! - `"Error in {name}(): {error}"` at [`Level::Error`] when a `try_*` call
//!   returns `Err`,
//! - `"{name}() interrupted after {elapsed} seconds"` at [`Level::Warning`]
//!   when the call unwinds or the future is dropped before it resolves.
//!
//! The value, error or panic of the wrapped call always reaches the caller
//! untouched.

use std::borrow::Cow;
use std::fmt;
use std::future::Future;
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

/// Render an elapsed duration as seconds with exactly three decimals.
pub fn format_seconds(elapsed: Duration) -> String {
    format!("{:.3}", elapsed.as_secs_f64())
}

/// Last path segment of a type name, without generic arguments.
pub(crate) fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    let base = base.trim_start_matches('&');
    base.rsplit("::").next().unwrap_or(base)
}

/// Name of a fn item or closure as written in source. Closures resolve to
/// the function they are defined in.
pub(crate) fn callable_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::")
        .find(|segment| *segment != "{{closure}}")
        .unwrap_or(base)
}

#[derive(Clone)]
pub struct Timing {
    name: Cow<'static, str>,
    owner: String,
    level: Level,
    extra: Extra,
    logger: Option<Arc<dyn Logger>>,
}

impl fmt::Debug for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timing")
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("level", &self.level)
            .field("extra", &self.extra)
            .field("own_logger", &self.logger.is_some())
            .finish()
    }
}

impl Timing {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            owner: String::new(),
            level: Level::default(),
            extra: Extra::new(),
            logger: None,
        }
    }

    /// Timing named after `callable`'s function name.
    pub fn of<F>(_callable: &F) -> Self {
        Self::new(callable_name(std::any::type_name::<F>()).to_string())
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the level by name. Unknown names are an error, not a fallback.
    pub fn log_level(self, name: &str) -> Result<Self> {
        Ok(self.level(name.parse()?))
    }

    /// Record the type a method belongs to, from a full type name.
    pub fn owner(mut self, type_name: &str) -> Self {
        self.owner = short_type_name(type_name).to_string();
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.extra.insert(key.into(), value.to_string());
        self
    }

    /// Log through `logger` instead of the process-wide one.
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_options(mut self, options: &TimingOptions) -> Self {
        self.level = options.log_level;
        self.extra
            .extend(options.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn severity(&self) -> Level {
        self.level
    }

    pub fn call<R>(&self, f: impl FnOnce() -> R) -> R {
        let guard = CallGuard::start(self, false);
        let value = f();
        guard.completed();
        value
    }

    pub fn try_call<T, E: fmt::Display>(
        &self,
        f: impl FnOnce() -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E> {
        self.try_call_with(f, E::to_string)
    }

    /// Like [`Timing::try_call`], with `render` producing the error text.
    pub fn try_call_with<T, E>(
        &self,
        f: impl FnOnce() -> std::result::Result<T, E>,
        render: impl FnOnce(&E) -> String,
    ) -> std::result::Result<T, E> {
        let guard = CallGuard::start(self, false);
        let outcome = f();
        guard.settled(&outcome, render);
        outcome
    }

    pub async fn call_async<F: Future>(self, future: F) -> F::Output {
        let guard = CallGuard::start(&self, true);
        let value = future.await;
        guard.completed();
        value
    }

    pub async fn try_call_async<F, T, E>(self, future: F) -> std::result::Result<T, E>
    where
        F: Future<Output = std::result::Result<T, E>>,
        E: fmt::Display,
    {
        self.try_call_async_with(future, E::to_string).await
    }

    pub async fn try_call_async_with<F, T, E>(
        self,
        future: F,
        render: impl FnOnce(&E) -> String,
    ) -> std::result::Result<T, E>
    where
        F: Future<Output = std::result::Result<T, E>>,
    {
        let guard = CallGuard::start(&self, true);
        let outcome = future.await;
        guard.settled(&outcome, render);
        outcome
    }

    fn emit(
        &self,
        level: Level,
        message: &str,
        elapsed: Duration,
        is_async: bool,
        error: Option<&str>,
    ) {
        let execution = Execution {
            function_name: &self.name,
            class_name: &self.owner,
            execution_time: elapsed.as_secs_f64(),
            is_async: Some(is_async),
            error,
            extra: &self.extra,
        };
        registry::resolve(self.logger.as_ref()).log(level, message, &execution);
    }
}

/// Logs once: on `completed`/`settled`, or on drop if neither ran.
struct CallGuard<'a> {
    timing: &'a Timing,
    start: Instant,
    is_async: bool,
    armed: bool,
}

impl<'a> CallGuard<'a> {
    fn start(timing: &'a Timing, is_async: bool) -> Self {
        Self {
            timing,
            start: Instant::now(),
            is_async,
            armed: true,
        }
    }

    fn completed(mut self) {
        self.armed = false;
        let elapsed = self.start.elapsed();
        let message = format!(
            "{}() executed in {} seconds",
            self.timing.name,
            format_seconds(elapsed)
        );
        self.timing
            .emit(self.timing.level, &message, elapsed, self.is_async, None);
    }

    fn settled<T, E>(
        mut self,
        outcome: &std::result::Result<T, E>,
        render: impl FnOnce(&E) -> String,
    ) {
        match outcome {
            Ok(_) => self.completed(),
            Err(err) => {
                self.armed = false;
                let elapsed = self.start.elapsed();
                let error = render(err);
                let message = format!("Error in {}(): {error}", self.timing.name);
                self.timing
                    .emit(Level::Error, &message, elapsed, self.is_async, Some(&error));
            }
        }
    }
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let elapsed = self.start.elapsed();
        let message = format!(
            "{}() interrupted after {} seconds",
            self.timing.name,
            format_seconds(elapsed)
        );
        self.timing
            .emit(Level::Warning, &message, elapsed, self.is_async, None);
    }
}
