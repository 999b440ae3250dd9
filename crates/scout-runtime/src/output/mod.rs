//! # Run Outputs
//!
//! - `result_csv`: the final short list as `result.csv`
//! - `trace_log`: a size-capped history of short lists in `trace.log`

pub mod result_csv;
pub mod trace_log;

pub use result_csv::write_results;
pub use trace_log::append_results;

use thiserror::Error;

/// Output file errors. Callers log these and carry on.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl OutputError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
