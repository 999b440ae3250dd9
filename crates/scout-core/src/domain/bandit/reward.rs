//! Reward shaping: probe outcome -> `[0, 1]`.

/// Reward weights and normalization bounds
#[derive(Debug, Clone, PartialEq)]
pub struct RewardConfig {
    /// Share of the reward earned by latency
    pub latency_weight: f64,
    /// Share of the reward earned by throughput
    pub throughput_weight: f64,
    /// Latency at or below this earns the full latency share (ms)
    pub latency_floor_ms: f64,
    /// Latency share falls to zero this far above the floor (ms)
    pub latency_span_ms: f64,
    /// Throughput at or above this earns the full throughput share (MB/s)
    pub throughput_cap_mbps: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            latency_weight: 0.3,
            throughput_weight: 0.7,
            latency_floor_ms: 50.0,
            latency_span_ms: 150.0,
            throughput_cap_mbps: 10.0,
        }
    }
}

impl RewardConfig {
    /// Reward of one outcome.
    ///
    /// Lost probes earn nothing. Connect-only outcomes can earn at most the
    /// latency share.
    pub fn reward(&self, latency_ms: f64, throughput_mbps: f64, lost: bool, tcp_only: bool) -> f64 {
        if lost {
            return 0.0;
        }
        let late = ((latency_ms - self.latency_floor_ms) / self.latency_span_ms).clamp(0.0, 1.0);
        let latency_score = self.latency_weight * (1.0 - late);
        if tcp_only {
            return latency_score;
        }
        let speed = (throughput_mbps / self.throughput_cap_mbps).clamp(0.0, 1.0);
        latency_score + self.throughput_weight * speed
    }
}
