//! # Scouting Service
//!
//! Wires the domain to the ports:
//!
//! - [`SharedModel`]: the bandit model behind one lock plus its store; every
//!   mutation from concurrent probe workers goes through it.
//! - [`ProbeEngine`]: Stage 1 connect probes, join barrier, Stage 2
//!   throughput probes, final selection, one decay-and-persist.

mod engine;
mod shared_model;

pub use engine::{ProbeEngine, ProbeReport};
pub use shared_model::SharedModel;
