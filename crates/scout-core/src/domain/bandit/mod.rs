//! # Bandit Model (UCB1 over /24 groups)
//!
//! Persistent scoring state that decides where the probe budget goes.
//!
//! ## Scoring
//!
//! - Unexplored groups (absent, or `count < 0.1`) score a sentinel that beats
//!   any explored group, so they are always tried first.
//! - Explored groups score `avg_reward + sqrt(2 ln(max(N, 1)) / n)`.
//!
//! ## Learning
//!
//! - Every probe outcome is reduced to a reward in `[0, 1]` (latency worth
//!   0.3, throughput worth 0.7).
//! - A bad outcome against an established good group is dampened to weight
//!   0.2 so one flaky probe cannot sink it.
//! - At the end of a run all weights decay by `decay_rate` and stale,
//!   low-value groups are pruned before the model is persisted.

mod config;
mod model;
mod record;
mod reward;
mod snapshot;

pub use config::BanditConfig;
pub use model::BanditModel;
pub use record::GroupRecord;
pub use reward::RewardConfig;
pub use snapshot::{ModelSnapshot, MODEL_VERSION};

#[cfg(test)]
mod tests;
