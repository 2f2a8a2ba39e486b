//! Error types for SaveBackup
//!
//! Uses `thiserror` for library errors. The configuration record itself never
//! fails; only loading and persisting it can.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigFormat;

/// Result type alias for SaveBackup operations
pub type SaveBackupResult<T> = Result<T, SaveBackupError>;

/// Main error type for SaveBackup operations
#[derive(Error, Debug)]
pub enum SaveBackupError {
    /// Config file on disk could not be parsed
    #[error("invalid config file {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// In-memory config text could not be parsed
    #[error("invalid {format} config: {message}")]
    Parse {
        format: ConfigFormat,
        message: String,
    },

    /// Config could not be serialized (e.g. a path that is not valid UTF-8)
    #[error("failed to serialize config as {format}: {message}")]
    Serialize {
        format: ConfigFormat,
        message: String,
    },

    /// Temp file could not be moved over the destination
    #[error("failed to persist config to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
