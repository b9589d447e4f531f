use std::path::PathBuf;

use thiserror::Error;

use crate::job::{CopyJobInfo, SyncJobInfo};

/// Errors produced while inspecting a SAS token.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SasTokenError {
    /// The token has no `se` (session expiry) query parameter.
    #[error("cannot find session expiry parameter in SAS token")]
    MissingExpiryClaim,

    /// The expiry value is not a `YYYY-MM-DDTHH:MM:SSZ` timestamp.
    #[error("malformed session expiry timestamp: {0:?}")]
    MalformedTimestamp(String),
}

/// Errors produced while preparing or running a transfer.
///
/// The `CopyIncomplete` and `SyncIncomplete` variants carry the job record
/// collected up to the failure, so callers can inspect partial counters
/// without any further ceremony.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The SAS token could not be inspected.
    #[error(transparent)]
    SasToken(#[from] SasTokenError),

    /// The SAS token's session expiry has passed.
    #[error("SAS token is expired")]
    ExpiredCredential,

    /// Source and destination are both local or both remote.
    #[error("source and destination are the same kind of location")]
    SameLocationKind,

    /// A local endpoint of a sync does not exist on disk.
    #[error("local path not found: {}", .0.display())]
    LocalPathNotFound(PathBuf),

    /// The external tool exited with a non-zero code.
    #[error("command {command:?} exited with code {code}")]
    ProcessExited {
        /// The exit code reported by the process.
        code: i32,

        /// The command line that was executed.
        command: Vec<String>,
    },

    /// Spawning or reading from the external tool failed.
    #[error("failed to run transfer tool: {0}")]
    Io(#[from] std::io::Error),

    /// A copy finished without reporting full success.
    #[error("{message}")]
    CopyIncomplete {
        /// Human-readable diagnostic for the failure.
        message: String,

        /// The partially populated job record.
        job: Box<CopyJobInfo>,
    },

    /// A sync finished without reporting full success.
    #[error("{message}")]
    SyncIncomplete {
        /// Human-readable diagnostic for the failure.
        message: String,

        /// The partially populated job record.
        job: Box<SyncJobInfo>,
    },
}
