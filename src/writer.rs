use {
    crate::{
        file_state::{FileMeta, FileState},
        format, Host, LoggerError, RotationPolicy, Severity,
    },
    chrono::FixedOffset,
    crossbeam_channel::{Receiver, Sender},
    std::thread::{self, JoinHandle},
};

/// Exit status used after a `Fatal` record has been written.
pub const FATAL_EXIT_CODE: i32 = 1;

/// A record travelling from a producer to the writer.
///
/// Leveled records carry their fully formatted line; raw records carry the
/// content exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LogRecord {
    severity: Severity,
    content: String,
}

impl LogRecord {
    pub(crate) fn new(severity: Severity, content: String) -> Self {
        LogRecord { severity, content }
    }
}

/// What goes through the ingestion queue.
pub(crate) enum Message {
    Record(LogRecord),
    /// Turns console echo on or off for every record queued after it.
    SetConsole(bool),
    /// Acknowledged once every message queued before it has been handled.
    Flush(Sender<()>),
}

/// Everything the writer thread takes ownership of.
pub(crate) struct WriterConfig {
    pub(crate) meta: FileMeta,
    pub(crate) policy: RotationPolicy,
    pub(crate) min_level: Severity,
    pub(crate) console: bool,
    pub(crate) offset: FixedOffset,
    pub(crate) host: Box<dyn Host>,
}

/// The single consumer of the queue and sole owner of the file state.
struct Writer {
    state: FileState,
    policy: RotationPolicy,
    min_level: Severity,
    console: bool,
    offset: FixedOffset,
    host: Box<dyn Host>,
}

/// Start the writer thread and block until it is ready to drain `receiver`.
pub(crate) fn spawn(config: WriterConfig, receiver: Receiver<Message>) -> Result<JoinHandle<()>, LoggerError> {
    let (ready_tx, ready_rx) = crossbeam_channel::bounded(1);
    let handle = thread::Builder::new()
        .name("spoolog-writer".to_string())
        .spawn(move || {
            let mut writer = Writer::open(config);
            let _ = ready_tx.send(());
            writer.run(receiver);
        })
        .map_err(|err| LoggerError::SpawnWriterFailed(err.to_string()))?;

    ready_rx.recv().map_err(|_| LoggerError::WriterDisconnected)?;
    Ok(handle)
}

impl Writer {
    fn open(config: WriterConfig) -> Self {
        let WriterConfig {
            meta,
            policy,
            min_level,
            console,
            offset,
            mut host,
        } = config;
        let state = FileState::open(meta, &policy, format::now(&offset), host.as_mut());
        Writer {
            state,
            policy,
            min_level,
            console,
            offset,
            host,
        }
    }

    /// Drain the queue until every producer handle is gone.
    fn run(&mut self, receiver: Receiver<Message>) {
        for message in receiver {
            match message {
                Message::Record(record) => self.handle(record),
                Message::SetConsole(console) => self.console = console,
                Message::Flush(ack) => {
                    let _ = ack.send(());
                }
            }
        }
    }

    fn handle(&mut self, record: LogRecord) {
        // Rotation is decided before the level filter, so a filtered record
        // can still close a file that already went over its limit.
        let now = format::now(&self.offset);
        if self.state.should_rotate(&self.policy, now) {
            self.state.rotate(&self.policy, now, self.host.as_mut());
        }

        if !record.severity.passes(self.min_level) {
            return;
        }

        if self.console {
            self.host.stdout(&record.content);
        }

        let written = self.state.write(&record.content, self.host.as_mut());
        if !written && !self.console {
            // No file to write to: the record must still go somewhere.
            self.host.stdout(&record.content);
        }

        if record.severity.is_fatal() {
            self.host.terminate(FATAL_EXIT_CODE);
        }
    }
}
