//! # Driven Ports (Outbound SPI)
//!
//! Interfaces the host application (or a test) must implement.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{ModelSnapshot, ProbeError, StoreError};

/// Bounded-timeout transport connection to one endpoint.
///
/// # Thread Safety
///
/// Implementations are shared by hundreds of concurrent workers and must be
/// `Send + Sync`.
#[async_trait]
pub trait ConnectProbe: Send + Sync {
    /// Connect to `target`, giving up after `timeout`.
    ///
    /// Returns the time taken to establish the connection.
    async fn connect(&self, target: SocketAddr, timeout: Duration) -> Result<Duration, ProbeError>;
}

/// Bulk download against a benchmark endpoint served at a given address.
#[async_trait]
pub trait ThroughputProbe: Send + Sync {
    /// Download from `address` under the implementation's time budget.
    ///
    /// Returns throughput in MB/s (bytes / 2^20 / seconds).
    async fn measure(&self, address: IpAddr) -> Result<f64, ProbeError>;
}

/// Durable storage for the bandit model.
///
/// `save` must be atomic: a reader sees either the previous snapshot or the
/// new one, never a partial write.
pub trait ModelStore: Send + Sync {
    /// Load the stored snapshot. `Ok(None)` when nothing is stored yet.
    fn load(&self) -> Result<Option<ModelSnapshot>, StoreError>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &ModelSnapshot) -> Result<(), StoreError>;
}
