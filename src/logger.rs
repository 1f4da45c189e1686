use {
    crate::{
        file_state::FileMeta,
        format::{self, format_line},
        writer::{self, LogRecord, Message, WriterConfig},
        Host, LoggerError, ProcessHost, RotationPolicy, Severity, TimeZone,
    },
    chrono::FixedOffset,
    crossbeam_channel::Sender,
    std::{
        fmt,
        panic::Location,
        path::{Path, PathBuf},
        sync::Arc,
        thread::JoinHandle,
    },
};

/// Records the ingestion queue holds before producers start to block.
pub const DEFAULT_QUEUE_CAPACITY: usize = 2048;

/// Configuration collected by [`LoggerBuilder`].
struct LoggerMeta {
    /// Records below this severity are not written.
    level: Severity,
    /// When the active file rolls over.
    policy: RotationPolicy,
    /// Whether records are echoed to the console from the start.
    console: bool,
    /// The time zone used for timestamps, rotated file dates and midnight.
    time_zone: TimeZone,
    /// Capacity of the ingestion queue.
    queue_capacity: usize,
    /// The file permissions to set on newly created log files (Unix-like
    /// systems only).
    file_mode: Option<u32>,
    /// Console, diagnostic and process-exit side effects.
    host: Box<dyn Host>,
}

/// Provides a fluent interface for configuring [`Logger`] instances.
///
/// # Default Configuration
///
/// * Minimum level `Debug`
/// * Rotation at 1 day, 1,000,000 lines or 100 MiB, whichever comes first
/// * No console echo
/// * Local system time zone
/// * A queue of 2048 records
///
/// # Examples
///
/// ```rust,no_run
/// use spoolog::{LoggerBuilder, RotationPolicy, RotationSize, Severity, TimeZone};
///
/// let logger = LoggerBuilder::new("./logs/app.log")
///     .level(Severity::Info)
///     .policy(RotationPolicy::new(1, 0, RotationSize::MB(50)))
///     .time_zone(TimeZone::UTC)
///     .build()
///     .unwrap();
///
/// spoolog::info!(logger, "listening on port {}", 8080);
/// ```
pub struct LoggerBuilder {
    path: PathBuf,
    meta: LoggerMeta,
}

impl LoggerBuilder {
    /// Create a new logger builder.
    /// # Arguments
    /// * `path` - The full path of the active log file. Rotated files are
    ///   created next to it.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        LoggerBuilder {
            path: path.as_ref().to_path_buf(),
            meta: LoggerMeta {
                level: Severity::Debug,
                policy: RotationPolicy::default(),
                console: false,
                time_zone: TimeZone::Local,
                queue_capacity: DEFAULT_QUEUE_CAPACITY,
                file_mode: None,
                host: Box::new(ProcessHost),
            },
        }
    }

    /// Set the minimum severity written to the file and the console.
    pub fn level(self, level: Severity) -> Self {
        Self {
            path: self.path,
            meta: LoggerMeta { level, ..self.meta },
        }
    }

    /// Set the rotation policy.
    pub fn policy(self, policy: RotationPolicy) -> Self {
        Self {
            path: self.path,
            meta: LoggerMeta { policy, ..self.meta },
        }
    }

    /// Echo every written record to the console.
    pub fn console(self, console: bool) -> Self {
        Self {
            path: self.path,
            meta: LoggerMeta { console, ..self.meta },
        }
    }

    /// Set the time zone for timestamps and rotation.
    pub fn time_zone(self, time_zone: TimeZone) -> Self {
        Self {
            path: self.path,
            meta: LoggerMeta { time_zone, ..self.meta },
        }
    }

    /// Set how many records may wait for the writer before producers block.
    pub fn queue_capacity(self, queue_capacity: usize) -> Self {
        Self {
            path: self.path,
            meta: LoggerMeta {
                queue_capacity: queue_capacity.max(1),
                ..self.meta
            },
        }
    }

    /// Set the file permissions for log files (Unix-like systems only).
    /// For example, 0o644 for rw-r--r-- permissions.
    pub fn file_mode(self, mode: u32) -> Self {
        Self {
            path: self.path,
            meta: LoggerMeta {
                file_mode: Some(mode),
                ..self.meta
            },
        }
    }

    /// Replace the process-level side effects of the writer.
    pub fn host<H: Host>(self, host: H) -> Self {
        Self {
            path: self.path,
            meta: LoggerMeta {
                host: Box::new(host),
                ..self.meta
            },
        }
    }

    /// Build the logger. Returns once the writer thread is running.
    ///
    /// A log file that cannot be opened is not an error: it is reported on
    /// the diagnostic channel and records go to the console instead.
    pub fn build(self) -> Result<Logger, LoggerError> {
        let filename = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| LoggerError::InvalidPath(self.path.clone()))?
            .to_string();
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let offset = self.meta.time_zone.offset();
        let (sender, receiver) = crossbeam_channel::bounded(self.meta.queue_capacity);

        let handle = writer::spawn(
            WriterConfig {
                meta: FileMeta::new(directory, filename, self.meta.file_mode),
                policy: self.meta.policy,
                min_level: self.meta.level,
                console: self.meta.console,
                offset,
                host: self.meta.host,
            },
            receiver,
        )?;

        Ok(Logger {
            sender,
            offset,
            _writer: Arc::new(WriterGuard { handle: Some(handle) }),
        })
    }
}

/// Joins the writer thread once the last [`Logger`] clone is gone.
struct WriterGuard {
    handle: Option<JoinHandle<()>>,
}

impl Drop for WriterGuard {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// The producer side of the logger.
///
/// Every call formats its record on the calling thread (timestamp and call
/// site are captured here, not when the record is written) and pushes it on
/// the ingestion queue. When the queue is full the call blocks until the
/// writer catches up; records are never dropped.
///
/// Clones share the same queue and writer. Dropping the last clone lets the
/// writer drain what is queued and waits for it to finish.
#[derive(Clone)]
pub struct Logger {
    // Declared before `_writer`: the queue must disconnect before the join.
    sender: Sender<Message>,
    offset: FixedOffset,
    _writer: Arc<WriterGuard>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("queued", &self.sender.len())
            .field("offset", &self.offset)
            .finish()
    }
}

impl Logger {
    /// Create a logger with the default configuration.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Logger, LoggerError> {
        LoggerBuilder::new(path).build()
    }

    /// Turn console echo on or off. The switch travels through the queue,
    /// so it applies to every record logged after this call and to none
    /// logged before it, even those the writer has not reached yet.
    pub fn set_console(&self, console: bool) {
        let _ = self.sender.send(Message::SetConsole(console));
    }

    #[track_caller]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Debug, args);
    }

    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Info, args);
    }

    #[track_caller]
    pub fn warning(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Warning, args);
    }

    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Error, args);
    }

    /// Log at `Fatal` severity. Once the writer has written this record it
    /// terminates the process through [`Host::terminate`].
    #[track_caller]
    pub fn fatal(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Fatal, args);
    }

    /// Write `content` as is: no timestamp, no newline, no level filter.
    pub fn print(&self, content: impl Into<String>) {
        self.enqueue(LogRecord::new(Severity::Print, content.into()));
    }

    /// Write formatted content as is: no timestamp, no newline, no level
    /// filter.
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.enqueue(LogRecord::new(Severity::Printf, fmt::format(args)));
    }

    /// Log a record at the given severity. Leveled records are rendered
    /// with the current time and the caller's location.
    #[track_caller]
    pub fn log(&self, severity: Severity, args: fmt::Arguments<'_>) {
        let content = if severity.is_raw() {
            fmt::format(args)
        } else {
            format_line(
                severity,
                format::now(&self.offset),
                Location::caller(),
                &fmt::format(args),
            )
        };
        self.enqueue(LogRecord::new(severity, content));
    }

    /// Block until every record queued before this call has been written.
    pub fn flush(&self) -> Result<(), LoggerError> {
        let (ack_tx, ack_rx) = crossbeam_channel::bounded(1);
        self.sender
            .send(Message::Flush(ack_tx))
            .map_err(|_| LoggerError::WriterDisconnected)?;
        ack_rx.recv().map_err(|_| LoggerError::WriterDisconnected)
    }

    pub(crate) fn enqueue(&self, record: LogRecord) {
        // Only fails once the writer thread is gone; nothing is left to
        // write the record then.
        let _ = self.sender.send(Message::Record(record));
    }
}
