//! # Integration Flows
//!
//! Generator, engine and model wired together the way the runtime wires
//! them, across several runs.

pub mod exploration;
pub mod interrupt;
pub mod learning_loop;
pub mod loopback;
