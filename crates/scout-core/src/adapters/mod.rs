//! # Adapters
//!
//! Concrete implementations of the outbound ports.
//!
//! - `tcp`: tokio connect probe (feature `network`)
//! - `http`: reqwest download probe (feature `network`)
//! - `store`: JSON file model store (feature `persistence`)
//! - `mocks`: in-memory test doubles (feature `test-utils`)

#[cfg(feature = "network")]
pub mod http;
#[cfg(feature = "network")]
pub mod tcp;

#[cfg(feature = "network")]
pub use http::{HttpThroughputConfig, HttpThroughputProbe};
#[cfg(feature = "network")]
pub use tcp::TcpConnectProbe;

#[cfg(feature = "persistence")]
pub mod store;

#[cfg(feature = "persistence")]
pub use store::JsonModelStore;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;
