//! UCB1 bandit model implementation.

use std::collections::HashMap;
use std::net::IpAddr;

use tracing::{debug, warn};

use super::config::BanditConfig;
use super::record::GroupRecord;
use super::snapshot::{ModelSnapshot, MODEL_VERSION};
use crate::domain::{GroupId, ProbeResult};

/// Scoring state over address groups.
///
/// # Invariant
///
/// `total_samples` is only changed together with a record's `count`, by
/// the same weight (or the same decay factor), so it tracks the sum of all
/// counts including those of pruned groups.
#[derive(Debug, Clone)]
pub struct BanditModel {
    /// Group id -> statistics
    groups: HashMap<GroupId, GroupRecord>,
    /// Decayed total weight (N in the UCB bonus)
    total_samples: f64,
    /// Process launches, incremented once per process
    launch_count: u64,
    /// Configuration
    config: BanditConfig,
}

impl BanditModel {
    /// Create an empty model.
    pub fn new(config: BanditConfig) -> Self {
        Self {
            groups: HashMap::new(),
            total_samples: 0.0,
            launch_count: 0,
            config,
        }
    }

    /// Rebuild a model from its durable form.
    ///
    /// Unparsable group ids and records holding non-finite or negative
    /// values are dropped. Keys naming the same /24 (`1.2.3.0` and
    /// `1.2.3.7`) are merged into one record.
    pub fn from_snapshot(snapshot: ModelSnapshot, config: BanditConfig) -> Self {
        if snapshot.version != MODEL_VERSION {
            debug!(
                "[bandit] Loading model version {} (current {})",
                snapshot.version, MODEL_VERSION
            );
        }

        let mut groups = HashMap::with_capacity(snapshot.subnets.len());
        let mut dropped = 0usize;
        for (key, record) in snapshot.subnets {
            match key.parse::<GroupId>() {
                Ok(id) if record.is_valid() => {
                    groups
                        .entry(id)
                        .and_modify(|kept: &mut GroupRecord| kept.merge(&record))
                        .or_insert(record);
                }
                _ => dropped += 1,
            }
        }
        if dropped > 0 {
            warn!("[bandit] Dropped {} corrupt group records", dropped);
        }

        let total_samples = if snapshot.total_runs.is_finite() && snapshot.total_runs >= 0.0 {
            snapshot.total_runs
        } else {
            groups.values().map(|r| r.count).sum()
        };

        Self {
            groups,
            total_samples,
            launch_count: snapshot.launch_count,
            config,
        }
    }

    /// Durable form of the current state.
    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            version: MODEL_VERSION,
            total_runs: self.total_samples,
            launch_count: self.launch_count,
            subnets: self
                .groups
                .iter()
                .map(|(id, record)| (id.to_string(), *record))
                .collect(),
        }
    }

    /// Count this process as a launch. Call once, right after loading.
    pub fn begin_launch(&mut self) {
        self.launch_count += 1;
    }

    /// UCB score of a group.
    ///
    /// Absent or nearly unexplored groups get `unexplored_score`, which no
    /// explored group can reach.
    pub fn score(&self, group: &GroupId) -> f64 {
        match self.groups.get(group) {
            Some(record) if record.count >= self.config.min_explored_count => {
                let n = self.total_samples.max(1.0);
                let bonus = (2.0 * n.ln() / record.count).sqrt();
                record.avg_reward() + bonus
            }
            _ => self.config.unexplored_score,
        }
    }

    /// Fold one probe outcome into its group.
    ///
    /// Returns the reward applied, or `None` for addresses without a group
    /// (IPv6).
    pub fn record_outcome(&mut self, result: &ProbeResult, tcp_only: bool) -> Option<f64> {
        let group = GroupId::of(&result.address)?;
        let reward = self.config.reward.reward(
            result.latency_ms,
            result.throughput_mbps,
            result.lost,
            tcp_only,
        );

        let record = self.groups.entry(group).or_default();
        let weight = if record.avg_reward() > self.config.dampen_trusted_avg
            && reward < self.config.dampen_outlier_reward
        {
            self.config.dampen_weight
        } else {
            1.0
        };

        record.add(reward, weight);
        self.total_samples += weight;
        Some(reward)
    }

    /// Same as [`record_outcome`](Self::record_outcome) for a bare address.
    pub fn record(
        &mut self,
        address: IpAddr,
        latency_ms: f64,
        throughput_mbps: f64,
        lost: bool,
        tcp_only: bool,
    ) -> Option<f64> {
        let result = ProbeResult {
            address,
            latency_ms,
            throughput_mbps,
            lost,
        };
        self.record_outcome(&result, tcp_only)
    }

    /// Cold start: first few launches, or too little history to trust.
    pub fn is_cold_start(&self) -> bool {
        self.launch_count <= self.config.cold_start_launches
            || self.groups.len() < self.config.cold_start_min_groups
    }

    /// Decay all weights and prune stale, low-value groups.
    ///
    /// Returns the number of pruned groups.
    pub fn decay(&mut self) -> usize {
        let rate = self.config.decay_rate;
        self.total_samples *= rate;
        for record in self.groups.values_mut() {
            record.scale(rate);
        }

        let before = self.groups.len();
        let max_count = self.config.prune_max_count;
        let max_avg = self.config.prune_max_avg_reward;
        self.groups
            .retain(|_, r| !(r.count < max_count && r.avg_reward() < max_avg));
        before - self.groups.len()
    }

    /// Statistics of one group.
    pub fn record_of(&self, group: &GroupId) -> Option<&GroupRecord> {
        self.groups.get(group)
    }

    /// Number of known groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Decayed total sample weight.
    pub fn total_samples(&self) -> f64 {
        self.total_samples
    }

    /// Launch counter.
    pub fn launch_count(&self) -> u64 {
        self.launch_count
    }

    /// Configuration.
    pub fn config(&self) -> &BanditConfig {
        &self.config
    }
}

impl Default for BanditModel {
    fn default() -> Self {
        Self::new(BanditConfig::default())
    }
}
