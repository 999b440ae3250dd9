//! Bandit model configuration.

use super::reward::RewardConfig;

/// Bandit model configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BanditConfig {
    /// Multiplier applied to all weights at the end of a run (0 < r < 1)
    pub decay_rate: f64,
    /// Score of groups with no usable history
    pub unexplored_score: f64,
    /// Groups with less weight than this count as unexplored
    pub min_explored_count: f64,

    /// Launches up to and including this one are cold
    pub cold_start_launches: u64,
    /// Fewer known groups than this is cold
    pub cold_start_min_groups: usize,

    /// Average reward above which a group is considered established
    pub dampen_trusted_avg: f64,
    /// Rewards below this count as outliers for established groups
    pub dampen_outlier_reward: f64,
    /// Weight of a dampened sample
    pub dampen_weight: f64,

    /// Groups below this weight are pruning candidates after decay
    pub prune_max_count: f64,
    /// ...if their average reward is also below this
    pub prune_max_avg_reward: f64,

    /// Reward shaping
    pub reward: RewardConfig,
}

impl Default for BanditConfig {
    fn default() -> Self {
        Self {
            decay_rate: 0.85,
            unexplored_score: 9999.0,
            min_explored_count: 0.1,
            cold_start_launches: 3,
            cold_start_min_groups: 100,
            dampen_trusted_avg: 0.6,
            dampen_outlier_reward: 0.1,
            dampen_weight: 0.2,
            prune_max_count: 0.5,
            prune_max_avg_reward: 0.2,
            reward: RewardConfig::default(),
        }
    }
}

impl BanditConfig {
    /// Default configuration with a different decay rate.
    pub fn with_decay_rate(decay_rate: f64) -> Self {
        Self {
            decay_rate,
            ..Self::default()
        }
    }
}
