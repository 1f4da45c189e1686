use {
    crate::{
        host::{Host, DIAGNOSTIC_TAG},
        LoggerError, RotationPolicy,
    },
    chrono::{DateTime, FixedOffset, NaiveDate},
    regex::Regex,
    std::{
        fs,
        io::Write as _,
        path::{Path, PathBuf},
    },
};

#[cfg(unix)]
use std::{fs::Permissions, os::unix::fs::PermissionsExt};

/// Suffix of every rotated file, stripped from the base name when present.
pub const LOG_SUFFIX: &str = ".log";

/// Where the log files live and how they are created.
#[derive(Debug, Clone)]
pub(crate) struct FileMeta {
    /// The directory where the log files are stored.
    directory: PathBuf,
    /// The name of the active log file.
    filename: String,
    /// The file name without its `.log` suffix, used for rotated names.
    core: String,
    /// The file permissions to set on newly created log files (Unix-like
    /// systems only).
    file_mode: Option<u32>,
}

impl FileMeta {
    pub(crate) fn new(directory: PathBuf, filename: String, file_mode: Option<u32>) -> Self {
        let core = filename.strip_suffix(LOG_SUFFIX).unwrap_or(&filename).to_string();
        FileMeta {
            directory,
            filename,
            core,
            file_mode,
        }
    }

    /// The stable path every record is appended to.
    pub(crate) fn active_path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }

    /// Name of a rotated file: `{core}.{YYYY-MM-DD}.{seq}.log`, with the
    /// sequence zero-padded to at least three digits.
    pub(crate) fn rotated_name(&self, date: NaiveDate, sequence: u64) -> String {
        format!("{}.{}.{:03}{}", self.core, date.format("%Y-%m-%d"), sequence, LOG_SUFFIX)
    }

    /// Scan the directory for files rotated on `date` and return the highest
    /// sequence number found, or 0 when there is none.
    pub(crate) fn recover_sequence(&self, date: NaiveDate) -> u64 {
        let pattern = format!(
            r"^{}\.{}\.(\d+){}$",
            regex::escape(&self.core),
            date.format("%Y-%m-%d"),
            regex::escape(LOG_SUFFIX)
        );
        let Ok(file_pattern) = Regex::new(&pattern) else {
            return 0;
        };
        let Ok(files) = fs::read_dir(&self.directory) else {
            return 0;
        };

        let mut max_sequence = 0;
        for file in files.flatten() {
            if !file.metadata().is_ok_and(|metadata| metadata.is_file()) {
                continue;
            }
            let Some(file_name) = file.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if let Some(sequence) = file_pattern
                .captures(&file_name)
                .and_then(|captures| captures.get(1))
                .and_then(|sequence| sequence.as_str().parse::<u64>().ok())
            {
                max_sequence = max_sequence.max(sequence);
            }
        }
        max_sequence
    }

    /// Open the log file for appending, creating it and its directory if
    /// they don't exist.
    pub(crate) fn create_log_file(&self, log_path: &Path) -> Result<fs::File, LoggerError> {
        let mut open_options = fs::OpenOptions::new();
        open_options.append(true).create(true);

        let mut create_log_file_res = open_options.open(log_path);
        if create_log_file_res.is_err() {
            if let Some(parent) = log_path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|err| LoggerError::CreateDirectoryFailed(parent.to_path_buf(), err.to_string()))?;
                create_log_file_res = open_options.open(log_path);
            }
        }

        let log_file =
            create_log_file_res.map_err(|err| LoggerError::CreateFileFailed(log_path.to_path_buf(), err.to_string()))?;

        self.set_permissions(log_path)?;

        Ok(log_file)
    }

    fn set_permissions(&self, path: &Path) -> Result<(), LoggerError> {
        if let Some(mode) = self.file_mode {
            #[cfg(unix)]
            {
                let perms = Permissions::from_mode(mode);
                fs::set_permissions(path, perms).map_err(|err| LoggerError::SetFilePermissionsError {
                    path: path.to_path_buf(),
                    error: err.to_string(),
                })?
            }
            #[cfg(not(unix))]
            {
                eprintln!("{DIAGNOSTIC_TAG}Setting file permissions is not supported on non-Unix platforms");
            }
        }
        Ok(())
    }
}

/// Everything the writer knows about the active file.
///
/// Owned by the writer thread alone; nothing else reads or mutates it.
pub(crate) struct FileState {
    meta: FileMeta,
    /// The open handle, `None` when the file could not be opened.
    file: Option<fs::File>,
    /// Lines written through this handle. Not recovered on restart.
    lines: u64,
    /// Bytes in the active file, recovered from its size on startup.
    bytes: u64,
    /// The last sequence number used for `sequence_date`.
    sequence: u64,
    sequence_date: NaiveDate,
    deadline: Option<DateTime<FixedOffset>>,
    /// Counter values at the last failed rename. Line and byte triggers
    /// measure from here until a rename succeeds.
    retry_lines: u64,
    retry_bytes: u64,
    /// Set when the file was renamed but could not be reopened: the handle
    /// still points at this rotated file.
    degraded: Option<PathBuf>,
}

impl FileState {
    /// Open the active file and reconstruct the counters from disk.
    ///
    /// A file that can't be opened is reported and leaves the state without
    /// a handle; the writer then falls back to the console.
    pub(crate) fn open(
        meta: FileMeta,
        policy: &RotationPolicy,
        now: DateTime<FixedOffset>,
        host: &mut dyn Host,
    ) -> Self {
        let active_path = meta.active_path();
        let file = match meta.create_log_file(&active_path) {
            Ok(file) => Some(file),
            Err(err) => {
                host.diagnostic(&format!("{DIAGNOSTIC_TAG}{err}"));
                None
            }
        };
        let bytes = file
            .as_ref()
            .and_then(|file| file.metadata().ok())
            .map_or(0, |metadata| metadata.len());
        let sequence_date = now.date_naive();
        let sequence = meta.recover_sequence(sequence_date);

        FileState {
            meta,
            file,
            lines: 0,
            bytes,
            sequence,
            sequence_date,
            deadline: policy.next_deadline(now),
            retry_lines: 0,
            retry_bytes: 0,
            degraded: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn lines(&self) -> u64 {
        self.lines
    }

    #[cfg(test)]
    pub(crate) fn bytes(&self) -> u64 {
        self.bytes
    }

    #[cfg(test)]
    pub(crate) fn deadline(&self) -> Option<DateTime<FixedOffset>> {
        self.deadline
    }

    #[cfg(test)]
    pub(crate) fn has_file(&self) -> bool {
        self.file.is_some()
    }

    pub(crate) fn should_rotate(&self, policy: &RotationPolicy, now: DateTime<FixedOffset>) -> bool {
        policy.should_rotate(
            self.lines - self.retry_lines,
            self.bytes - self.retry_bytes,
            now,
            self.deadline,
        )
    }

    /// Roll the active file over. Failures are reported to the host and
    /// leave the writer appending to whatever handle it already has.
    pub(crate) fn rotate(&mut self, policy: &RotationPolicy, now: DateTime<FixedOffset>, host: &mut dyn Host) {
        if let Err(err) = self.try_rotate(policy, now) {
            host.diagnostic(&format!("{DIAGNOSTIC_TAG}{err}"));
        }
    }

    fn try_rotate(&mut self, policy: &RotationPolicy, now: DateTime<FixedOffset>) -> Result<(), LoggerError> {
        let active_path = self.meta.active_path();

        if self.file.is_none() {
            // Never opened: nothing to rename, retry the open once per period.
            self.deadline = policy.next_deadline(now);
            self.file = Some(self.meta.create_log_file(&active_path)?);
            return Ok(());
        }

        if self.degraded.is_none() {
            // 1. Pick the next sequence for today's date.
            let date = now.date_naive();
            let last_sequence = if date == self.sequence_date {
                self.sequence
            } else {
                self.meta.recover_sequence(date)
            };
            let sequence = last_sequence + 1;
            let rotated_path = self.meta.directory.join(self.meta.rotated_name(date, sequence));

            // 2. Rename the active file. On failure the counters keep going,
            // and the next attempt waits for another full threshold.
            if let Err(err) = fs::rename(&active_path, &rotated_path) {
                self.retry_lines = self.lines;
                self.retry_bytes = self.bytes;
                self.deadline = policy.next_deadline(now);
                return Err(LoggerError::RenameFileError {
                    from: active_path,
                    to: rotated_path,
                    error: err.to_string(),
                });
            }

            // 3. The rename is done: the counters now describe a new file.
            self.lines = 0;
            self.bytes = 0;
            self.retry_lines = 0;
            self.retry_bytes = 0;
            self.sequence = sequence;
            self.sequence_date = date;
            self.deadline = policy.next_deadline(now);
            self.degraded = Some(rotated_path);
        }

        // 4. Reopen the stable path; only then drop the old handle.
        let new_file = self
            .meta
            .create_log_file(&active_path)
            .map_err(|err| LoggerError::ReopenFileError {
                path: active_path.clone(),
                error: err.to_string(),
            })?;
        self.file = Some(new_file);
        self.degraded = None;
        Ok(())
    }

    /// Append one record to the active file. Returns `false` when there is
    /// no handle to write to.
    pub(crate) fn write(&mut self, content: &str, host: &mut dyn Host) -> bool {
        let Some(file) = self.file.as_mut() else {
            return false;
        };
        if let Some(rotated) = &self.degraded {
            let err = LoggerError::DegradedWrite {
                active: self.meta.active_path(),
                rotated: rotated.clone(),
            };
            host.diagnostic(&format!("{DIAGNOSTIC_TAG}{err}"));
        }

        let buf = content.as_bytes();
        let _ = file.write_all(buf);
        self.lines += 1;
        self.bytes += buf.len() as u64;
        true
    }
}
