//! Probe engine configuration.

use std::time::Duration;

use super::selection::SelectionPolicy;

/// Upper bound on either stage's worker pool
pub const MAX_WORKERS: usize = 1 << 16;

/// Probe engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    /// Stage 1: maximum concurrent connect probes
    pub threads: usize,
    /// Stage 1: per-connect timeout
    pub connect_timeout: Duration,
    /// Stage 1: port probed on every candidate
    pub port: u16,
    /// Stage 2: number of fastest survivors to speed-test
    pub speed_test_range: usize,
    /// Stage 2: maximum concurrent downloads
    pub speed_concurrency: usize,
    /// Final selection thresholds
    pub selection: SelectionPolicy,
    /// Log Stage 1 progress every this many completions
    pub progress_every: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            threads: 500,
            connect_timeout: Duration::from_secs(1),
            port: 443,
            speed_test_range: 20,
            speed_concurrency: 1,
            selection: SelectionPolicy::default(),
            progress_every: 1000,
        }
    }
}

impl ProbeConfig {
    /// Stage 1 worker bound, kept within `[1, MAX_WORKERS]`.
    pub fn stage1_workers(&self) -> usize {
        self.threads.clamp(1, MAX_WORKERS)
    }

    /// Stage 2 worker bound, kept within `[1, speed_test_range]` and
    /// `MAX_WORKERS`.
    pub fn stage2_workers(&self) -> usize {
        self.speed_concurrency
            .min(self.speed_test_range)
            .clamp(1, MAX_WORKERS)
    }
}
