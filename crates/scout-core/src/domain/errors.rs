//! Domain errors for Edge-Scout.

use thiserror::Error;

/// Errors that abort a scouting run.
///
/// Probe failures are not errors: they are recorded as loss outcomes.
/// Persistence failures are logged and swallowed where they occur.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoutError {
    /// No address range of any family was supplied
    #[error("no candidate address ranges supplied")]
    NoRanges,
    /// Generation produced an empty probe list
    #[error("candidate generation produced no addresses")]
    NoCandidates,
    /// A CIDR line could not be parsed
    #[error("invalid address range: {0}")]
    InvalidRange(String),
}

/// Failure of a single probe attempt.
///
/// Never propagated out of the engine; it becomes a loss (Stage 1) or a
/// zero throughput (Stage 2).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// Deadline elapsed before the operation completed
    #[error("probe timed out")]
    Timeout,
    /// Remote refused or reset the connection
    #[error("connection failed: {0}")]
    Connect(String),
    /// Transfer failed after the connection was established
    #[error("transfer failed: {0}")]
    Transfer(String),
    /// Worker task died before reporting
    #[error("probe task aborted")]
    Aborted,
}

/// Errors from the durable model store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("model store I/O error on {path}: {message}")]
    Io {
        /// Path of the store file
        path: String,
        /// Error message from the I/O operation
        message: String,
    },
    /// Stored bytes are not a valid model
    #[error("model store is corrupt: {0}")]
    Corrupt(String),
}
