//! Domain Layer - pure selection and scoring logic with no I/O
//!
//! This module contains:
//! - Address ranges and their /24 group expansion
//! - The UCB bandit model over address groups (decay, dampening, pruning)
//! - The candidate generator (cold-start census vs. warm tiered budget)
//! - Probe results, their ordering and the final selection policy

pub mod bandit;
pub mod errors;
pub mod generator;
pub mod probe;
pub mod range;
pub mod value_objects;

pub use bandit::*;
pub use errors::*;
pub use generator::*;
pub use probe::*;
pub use range::*;
pub use value_objects::*;
