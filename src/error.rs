//! Per-file processing errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a single file could not be cleaned.
///
/// None of these abort a batch; the runner records them against the file
/// and moves on.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("failed to create backup {}: {source}", backup.display())]
    Backup {
        backup: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not valid UTF-8", path.display())]
    Decode { path: PathBuf },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to restore {} from {}: {source}", path.display(), backup.display())]
    Restore {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProcessError {
    /// Short machine-readable tag for reports.
    pub fn kind(&self) -> &'static str {
        match self {
            ProcessError::Backup { .. } => "backup",
            ProcessError::Read { .. } => "read",
            ProcessError::Decode { .. } => "decode",
            ProcessError::Write { .. } => "write",
            ProcessError::Restore { .. } => "restore",
        }
    }
}
