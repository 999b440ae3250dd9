//! # Edge-Scout Core
//!
//! Finds low-latency, high-throughput endpoints inside large published
//! address ranges without probing all of them.
//!
//! Each run draws a bounded sample of addresses, probes them, and folds
//! every outcome into a per-/24 UCB1 bandit model that is persisted between
//! runs. Later runs spend most of their probe budget on groups that scored
//! well and keep a small share for groups that have not been tried.
//!
//! ## Architecture
//!
//! - **Domain Layer:** address ranges, bandit model, candidate generator,
//!   probe results and final selection. Pure, no I/O.
//! - **Ports Layer:** connect probe, throughput probe, model store.
//! - **Service Layer:** [`SharedModel`] and the two-stage [`ProbeEngine`].
//! - **Adapters Layer:** tokio TCP, reqwest HTTP, JSON file store
//!   (feature-gated), mocks for tests.
//!
//! ## Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use scout_core::{BanditModel, CandidateGenerator, Ipv4Range};
//!
//! let ranges = vec![Ipv4Range::new("104.16.0.0".parse().unwrap(), 22).unwrap()];
//! let model = BanditModel::default();
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let candidates = CandidateGenerator::default().generate(&ranges, &[], 100, &model, &mut rng);
//! assert_eq!(candidates.len(), 100);
//! ```

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod domain;
pub mod ports;
pub mod service;

// =============================================================================
// ADAPTERS (contents feature-gated)
// =============================================================================

pub mod adapters;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use domain::{
    // Ranges
    expand_groups, parse_range_list, AddressFamily, AddressRange, GroupId, Ipv4Range, Ipv6Range,
    GROUP_PREFIX,
    // Bandit
    BanditConfig, BanditModel, GroupRecord, ModelSnapshot, RewardConfig, MODEL_VERSION,
    // Generator
    Allocation, BudgetPlan, CandidateGenerator, GenerationMode, GeneratorConfig, Tier, TierStats,
    // Probing
    rank_by_latency, select_final, ProbeConfig, ProbeResult, SelectionPolicy,
    // Errors
    ProbeError, ScoutError, StoreError,
};

pub use ports::{ConnectProbe, ModelStore, ThroughputProbe};

pub use service::{ProbeEngine, ProbeReport, SharedModel};

#[cfg(feature = "network")]
pub use adapters::{HttpThroughputConfig, HttpThroughputProbe, TcpConnectProbe};

#[cfg(feature = "persistence")]
pub use adapters::JsonModelStore;
