//! Two-stage probe engine.
//!
//! Stage 1 connects to every candidate under a bounded worker pool and feeds
//! each outcome into the shared model as it completes. Once every Stage 1
//! task has finished, the fastest survivors go through Stage 2 throughput
//! probes under a separate, smaller bound. The model is decayed and
//! persisted exactly once, after Stage 2.

use std::net::{IpAddr, SocketAddr};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::shared_model::SharedModel;
use crate::domain::{
    rank_by_latency, select_final, ProbeConfig, ProbeError, ProbeResult, ScoutError,
};
use crate::ports::{ConnectProbe, ThroughputProbe};

/// Outcome of one engine run.
#[derive(Debug, Clone, Default)]
pub struct ProbeReport {
    /// Number of addresses sent through Stage 1
    pub probed: usize,
    /// Stage 1 survivors, fastest connect first
    pub survivors: Vec<ProbeResult>,
    /// Stage 2 rows (with throughput), fastest connect first
    pub tested: Vec<ProbeResult>,
    /// Final short list, fastest download first
    pub selected: Vec<ProbeResult>,
}

/// Two-stage probe engine.
pub struct ProbeEngine {
    config: ProbeConfig,
    connect: Arc<dyn ConnectProbe>,
    throughput: Arc<dyn ThroughputProbe>,
}

impl ProbeEngine {
    pub fn new(
        config: ProbeConfig,
        connect: Arc<dyn ConnectProbe>,
        throughput: Arc<dyn ThroughputProbe>,
    ) -> Self {
        Self {
            config,
            connect,
            throughput,
        }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Probe `addresses`, learn from every outcome, and pick the short list.
    ///
    /// # Errors
    ///
    /// [`ScoutError::NoCandidates`] when `addresses` is empty. The model is
    /// left untouched in that case.
    pub async fn run(
        &self,
        addresses: Vec<IpAddr>,
        model: &SharedModel,
    ) -> Result<ProbeReport, ScoutError> {
        if addresses.is_empty() {
            return Err(ScoutError::NoCandidates);
        }
        let probed = addresses.len();

        let survivors = self.connect_stage(addresses, model).await;
        if survivors.is_empty() {
            warn!("[engine] No address answered the connect probe");
        }

        let tested = self.throughput_stage(&survivors, model).await;
        let selected = select_final(&tested, &self.config.selection);

        model.decay_and_persist();

        Ok(ProbeReport {
            probed,
            survivors,
            tested,
            selected,
        })
    }

    /// Stage 1: connect to every address with at most `threads` in flight.
    ///
    /// Returns the reachable results in ranking order. Returns only after
    /// every task has completed.
    pub async fn connect_stage(
        &self,
        addresses: Vec<IpAddr>,
        model: &SharedModel,
    ) -> Vec<ProbeResult> {
        let total = addresses.len();
        let workers = self.config.stage1_workers();
        let limiter = Arc::new(Semaphore::new(workers));
        let mut tasks = JoinSet::new();

        info!(
            "[engine] Stage 1: probing {} addresses on port {} ({} workers)",
            total, self.config.port, workers
        );

        for address in addresses {
            let limiter = Arc::clone(&limiter);
            let probe = Arc::clone(&self.connect);
            let target = SocketAddr::new(address, self.config.port);
            let timeout = self.config.connect_timeout;

            tasks.spawn(async move {
                let Ok(_permit) = limiter.acquire_owned().await else {
                    return ProbeResult::lost(address);
                };
                let outcome = AssertUnwindSafe(probe.connect(target, timeout))
                    .catch_unwind()
                    .await
                    .unwrap_or(Err(ProbeError::Aborted));
                match outcome {
                    Ok(elapsed) => {
                        ProbeResult::reachable(address, elapsed.as_secs_f64() * 1000.0)
                    }
                    Err(e) => {
                        debug!("[engine] {} lost: {}", target, e);
                        ProbeResult::lost(address)
                    }
                }
            });
        }

        let mut survivors = Vec::new();
        let mut done = 0usize;
        while let Some(joined) = tasks.join_next().await {
            done += 1;
            match joined {
                Ok(result) => {
                    model.record_outcome(&result, true);
                    if !result.lost {
                        survivors.push(result);
                    }
                }
                Err(e) => warn!("[engine] Connect task failed: {}", e),
            }
            if done == total
                || (self.config.progress_every > 0 && done % self.config.progress_every == 0)
            {
                info!("[engine] Progress: {}/{}", done, total);
            }
        }

        rank_by_latency(&mut survivors);
        info!(
            "[engine] Stage 1 complete: {}/{} reachable",
            survivors.len(),
            total
        );
        survivors
    }

    /// Stage 2: measure throughput on the `speed_test_range` fastest
    /// survivors, at most `speed_concurrency` at a time.
    ///
    /// A failed download counts as 0 MB/s; the connect result stands.
    pub async fn throughput_stage(
        &self,
        survivors: &[ProbeResult],
        model: &SharedModel,
    ) -> Vec<ProbeResult> {
        let candidates: Vec<ProbeResult> = survivors
            .iter()
            .filter(|r| !r.lost)
            .take(self.config.speed_test_range)
            .copied()
            .collect();
        if candidates.is_empty() {
            return Vec::new();
        }

        let workers = self.config.stage2_workers();
        info!(
            "[engine] Stage 2: speed testing top {} ({} at a time)",
            candidates.len(),
            workers
        );

        let limiter = Arc::new(Semaphore::new(workers));
        let mut tasks = JoinSet::new();
        for candidate in candidates {
            let limiter = Arc::clone(&limiter);
            let probe = Arc::clone(&self.throughput);

            tasks.spawn(async move {
                let mut row = candidate;
                let Ok(_permit) = limiter.acquire_owned().await else {
                    return row;
                };
                let outcome = AssertUnwindSafe(probe.measure(row.address))
                    .catch_unwind()
                    .await
                    .unwrap_or(Err(ProbeError::Aborted));
                match outcome {
                    Ok(speed) if speed.is_finite() && speed > 0.0 => row.throughput_mbps = speed,
                    Ok(_) => {}
                    Err(e) => debug!("[engine] Speed test on {} failed: {}", row.address, e),
                }
                row
            });
        }

        let mut tested = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(row) => {
                    model.record_outcome(&row, false);
                    info!(
                        "[engine] {:<39} | {:>7.2} ms | {:>6.2} MB/s",
                        row.address, row.latency_ms, row.throughput_mbps
                    );
                    tested.push(row);
                }
                Err(e) => warn!("[engine] Speed task failed: {}", e),
            }
        }

        rank_by_latency(&mut tested);
        tested
    }
}

impl std::fmt::Debug for ProbeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
