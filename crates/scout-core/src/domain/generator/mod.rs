//! # Candidate Generator
//!
//! Turns address ranges plus bandit scores into a concrete probe list.
//!
//! ## Policy
//!
//! 1. IPv4 ranges are expanded into /24 groups (the bandit arms).
//! 2. **Cold start** (few launches or little history): scores are ignored.
//!    Groups are shuffled and swept round-robin, one fresh host per group
//!    per sweep, until the target is met or every group is exhausted.
//! 3. **Warm**: groups are ranked by UCB score and budgeted by tier:
//!
//!    | Rank percentile | Tier    | Hosts per group |
//!    |-----------------|---------|-----------------|
//!    | top 5%          | Elite   | 5               |
//!    | 5-20%           | Good    | 3               |
//!    | 20-50%          | Normal  | 1               |
//!    | bottom 50%      | Explore | 1 with p=0.01, else 0 |
//!
//! 4. IPv6 ranges add `0.1 * target` unscored random addresses.
//! 5. The list is shuffled before it is returned.
//!
//! All randomness comes from the caller's RNG so runs can be replayed.

mod config;
mod service;
mod tiers;

pub use config::GeneratorConfig;
pub use service::{expand_groups, Allocation, BudgetPlan, CandidateGenerator, GenerationMode};
pub use tiers::{Tier, TierStats};
