//! Serialization boundary of the bandit model.

use std::collections::BTreeMap;

use super::record::GroupRecord;

/// Format version written by this build.
pub const MODEL_VERSION: u32 = 5;

/// Durable form of the model.
///
/// Field names match the on-disk JSON keys.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "persistence", serde(default))]
pub struct ModelSnapshot {
    /// Format version
    pub version: u32,
    /// Decayed total sample weight across all groups
    pub total_runs: f64,
    /// Process launches so far (never decayed)
    pub launch_count: u64,
    /// Group id (`a.b.c.0`) -> record
    pub subnets: BTreeMap<String, GroupRecord>,
}

impl Default for ModelSnapshot {
    fn default() -> Self {
        Self {
            version: MODEL_VERSION,
            total_runs: 0.0,
            launch_count: 0,
            subnets: BTreeMap::new(),
        }
    }
}

impl ModelSnapshot {
    /// Add a group record, keeping `total_runs` in step with its count.
    pub fn with_group(mut self, group: &str, count: f64, total_reward: f64) -> Self {
        self.total_runs += count;
        self.subnets
            .insert(group.to_string(), GroupRecord::new(count, total_reward));
        self
    }

    /// Set the launch counter.
    pub fn with_launch_count(mut self, launch_count: u64) -> Self {
        self.launch_count = launch_count;
        self
    }
}
