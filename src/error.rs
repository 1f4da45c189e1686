use std::path::PathBuf;

/// Errors that can occur when using the logger.
///
/// Only [`LoggerError::InvalidPath`] and [`LoggerError::SpawnWriterFailed`]
/// are ever returned from construction. Everything else is reported through
/// the diagnostic channel of the configured [`Host`](crate::Host) and never
/// reaches the caller.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("Invalid log path '{0}': no file name")]
    InvalidPath(PathBuf),
    #[error("Failed to create directory '{0}': {1}")]
    CreateDirectoryFailed(PathBuf, String),
    #[error("Failed to create file '{0}': {1}")]
    CreateFileFailed(PathBuf, String),
    #[error("Failed to rename file from '{from}' to '{to}': {error}")]
    RenameFileError { from: PathBuf, to: PathBuf, error: String },
    #[error("Failed to reopen log file '{path}' after rotation: {error}")]
    ReopenFileError { path: PathBuf, error: String },
    #[error("Writing to rotated file '{rotated}', log file '{active}' could not be reopened")]
    DegradedWrite { active: PathBuf, rotated: PathBuf },
    #[error("Failed to set file permissions for '{path}': {error}")]
    SetFilePermissionsError { path: PathBuf, error: String },
    #[error("Failed to spawn writer thread: {0}")]
    SpawnWriterFailed(String),
    #[error("Writer thread is no longer running")]
    WriterDisconnected,
}
