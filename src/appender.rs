//! Use a [`Logger`] as the writer of a `tracing_subscriber::fmt` layer.
//!
//! ```rust,no_run
//! use {spoolog::Logger, tracing_subscriber::util::SubscriberInitExt};
//!
//! let logger = Logger::new("./logs/tracing.log").unwrap();
//! tracing_subscriber::fmt()
//!     .with_writer(logger.clone())
//!     .with_ansi(false)
//!     .finish()
//!     .try_init()
//!     .unwrap();
//! ```
//!
//! Each event becomes one raw record: the subscriber does the formatting and
//! the logger only queues and rotates.
use {
    crate::{writer::LogRecord, Logger, Severity},
    std::io,
    tracing_subscriber::fmt::MakeWriter,
};

/// Collects one formatted event and enqueues it when dropped.
pub struct EventWriter<'a> {
    logger: &'a Logger,
    buf: Vec<u8>,
}

impl io::Write for EventWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for EventWriter<'_> {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let content = String::from_utf8_lossy(&self.buf).into_owned();
        self.logger.enqueue(LogRecord::new(Severity::Printf, content));
    }
}

impl<'a> MakeWriter<'a> for Logger {
    type Writer = EventWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        EventWriter {
            logger: self,
            buf: Vec::new(),
        }
    }
}
