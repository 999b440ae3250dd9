//! Runtime errors.

use thiserror::Error;

use crate::config::ConfigError;
use scout_core::ScoutError;

/// Errors that end a run with a non-zero exit code.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scout(#[from] ScoutError),
}

impl RuntimeError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }
}
