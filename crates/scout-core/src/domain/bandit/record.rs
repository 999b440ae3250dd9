//! Per-group statistics.

/// Decayed sample weight and reward of one group.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupRecord {
    /// Decayed sample weight (>= 0)
    pub count: f64,
    /// Decayed cumulative reward
    pub total_reward: f64,
}

impl GroupRecord {
    /// Create a record.
    pub fn new(count: f64, total_reward: f64) -> Self {
        Self { count, total_reward }
    }

    /// Mean reward, 0 for an empty record.
    pub fn avg_reward(&self) -> f64 {
        if self.count > 0.0 {
            self.total_reward / self.count
        } else {
            0.0
        }
    }

    /// Whether the stored values can be trusted.
    pub fn is_valid(&self) -> bool {
        self.count.is_finite() && self.count >= 0.0 && self.total_reward.is_finite()
    }

    pub(super) fn add(&mut self, reward: f64, weight: f64) {
        self.count += weight;
        self.total_reward += reward * weight;
    }

    pub(super) fn merge(&mut self, other: &GroupRecord) {
        self.count += other.count;
        self.total_reward += other.total_reward;
    }

    pub(super) fn scale(&mut self, factor: f64) {
        self.count *= factor;
        self.total_reward *= factor;
    }
}
