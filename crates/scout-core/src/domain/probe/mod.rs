//! # Probe Results
//!
//! Outcome rows produced by the two probe stages, their ranking, and the
//! policy that picks the final short list from the throughput stage.

mod config;
mod result;
mod selection;

pub use config::{ProbeConfig, MAX_WORKERS};
pub use result::ProbeResult;
pub use selection::{rank_by_latency, select_final, SelectionPolicy};
