//! Measure and log how long functions, futures and code blocks take.
//!
//! Three entry points:
//!
//! - [`timed`] (also exported as [`log`]): attribute for `fn` and
//!   `async fn`, bare or with `log_level = "..."`;
//! - [`time`]: guard that times the rest of the enclosing scope;
//! - [`set_logger`]: swap the process-wide [`Logger`] every line goes to.
//!
//! ```
//! use time_executioner::timed;
//!
//! #[timed]
//! fn add(a: i32, b: i32) -> i32 {
//!     a + b
//! }
//!
//! #[timed(log_level = "debug")]
//! async fn fetch_count() -> u32 {
//!     7
//! }
//!
//! assert_eq!(add(2, 3), 5); // logs "add() executed in 0.000 seconds"
//!
//! {
//!     let _timer = time_executioner::time("warmup");
//! } // logs "time_execute.warmup executed in 0.000 seconds"
//! ```
//!
//! Lines go to `tracing` under the `time_executioner` target until
//! [`set_logger`] installs something else.

#![deny(clippy::print_stdout, clippy::print_stderr)]

// Lets `#[timed]` expand to `::time_executioner::...` inside this crate too.
extern crate self as time_executioner;

pub mod block;
pub mod error;
pub mod error_text;
pub mod level;
pub mod logger;
pub mod options;
pub mod registry;
pub mod timing;

#[cfg(test)]
mod test_support;

pub use block::BLOCK_OWNER;
pub use block::BlockTimer;
pub use block::time;
pub use block::time_with_level;
pub use block::time_with_options;
pub use error::Result;
pub use error::TimerError;
pub use level::Level;
pub use logger::Execution;
pub use logger::Extra;
pub use logger::LOGGER_TARGET;
pub use logger::Logger;
pub use logger::TracingLogger;
pub use options::TimingOptions;
pub use registry::LoggerSlot;
pub use registry::current_logger;
pub use registry::reset_logger;
pub use registry::set_logger;
pub use registry::set_shared_logger;
pub use time_executioner_macros::timed;
pub use time_executioner_macros::timed as log;
pub use timing::Timing;
pub use timing::format_seconds;
