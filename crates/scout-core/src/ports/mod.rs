//! # Ports Layer
//!
//! Driven ports (SPIs) the engine needs from the outside world:
//!
//! - [`ConnectProbe`]: cheap connectivity probe (Stage 1)
//! - [`ThroughputProbe`]: bulk download probe (Stage 2)
//! - [`ModelStore`]: durable home of the bandit model
//!
//! Probe ports report failures as [`ProbeError`](crate::domain::ProbeError);
//! the engine turns those into loss outcomes and never propagates them.

pub mod outbound;

pub use outbound::{ConnectProbe, ModelStore, ThroughputProbe};
