//! # spoolog
//!
//! spoolog is an asynchronous, rotating file logger. Any number of threads
//! emit leveled records; one background writer thread owns the log file,
//! appends every record to it and rolls it over when a line count, a byte
//! size or a calendar-day threshold is exceeded.
//!
//! Producers format on their own thread (timestamp and call site are taken
//! when the record is created) and push the result on a bounded queue. When
//! the queue is full, producers block: records are never dropped.
//!
//! ## Files on disk
//!
//! * The active file always lives at the path the logger was built with,
//!   e.g. `./logs/app.log`.
//! * Rotated files are renamed next to it as
//!   `{name}.{YYYY-MM-DD}.{seq}.log`, e.g. `app.2026-10-18.001.log`. The
//!   sequence restarts for every date and continues from the highest one
//!   already on disk after a restart.
//!
//! ## Example
//!
//! ```rust,no_run
//! use spoolog::{LoggerBuilder, RotationPolicy, RotationSize, Severity};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let logger = LoggerBuilder::new("./logs/app.log")
//!         .level(Severity::Info)
//!         .policy(RotationPolicy::new(1, 100_000, RotationSize::MB(64)))
//!         .build()?;
//!     logger.set_console(true);
//!
//!     spoolog::info!(logger, "server started on port {}", 8080);
//!     spoolog::warning!(logger, "cache is {}% full", 93);
//!     logger.print("raw line, written as is\n");
//!
//!     logger.flush()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Failures
//!
//! The logger never fails the application because of its own I/O. A file
//! that can't be opened, renamed or reopened is reported on the diagnostic
//! channel (stderr, prefixed with `[S] `) and the writer keeps going with
//! what it has. The one deliberate exception is [`Severity::Fatal`]: after a
//! fatal record is written the process exits with status 1.

#[cfg(feature = "tracing")]
pub mod appender;
mod error;
mod file_state;
mod format;
mod host;
mod logger;
#[macro_use]
mod macros;
mod policy;
mod severity;
mod writer;

pub use {
    error::LoggerError,
    file_state::LOG_SUFFIX,
    format::{format_line, TimeZone},
    host::{Host, ProcessHost, DIAGNOSTIC_TAG},
    logger::{Logger, LoggerBuilder, DEFAULT_QUEUE_CAPACITY},
    policy::{
        RotationPolicy, RotationSize, DEFAULT_MAX_AGE_DAYS, DEFAULT_MAX_BYTES, DEFAULT_MAX_LINES, MAX_BYTES_CEILING,
    },
    severity::Severity,
    writer::FATAL_EXIT_CODE,
};
