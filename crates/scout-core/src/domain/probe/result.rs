//! Probe result row.

use std::cmp::Ordering;
use std::net::IpAddr;

/// Outcome of probing one address.
///
/// `latency_ms` is meaningful only when `lost` is false. `throughput_mbps`
/// stays 0 until the address passes through the throughput stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeResult {
    /// Probed address
    pub address: IpAddr,
    /// Connect latency in milliseconds
    pub latency_ms: f64,
    /// Download throughput in MB/s
    pub throughput_mbps: f64,
    /// Whether the connect probe failed
    pub lost: bool,
}

impl ProbeResult {
    /// A successful connect probe.
    pub fn reachable(address: IpAddr, latency_ms: f64) -> Self {
        Self {
            address,
            latency_ms,
            throughput_mbps: 0.0,
            lost: false,
        }
    }

    /// A failed connect probe.
    pub fn lost(address: IpAddr) -> Self {
        Self {
            address,
            latency_ms: 0.0,
            throughput_mbps: 0.0,
            lost: true,
        }
    }

    /// Ranking order: reachable before lost, then ascending latency.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        match (self.lost, other.lost) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            (true, true) => Ordering::Equal,
            (false, false) => self.latency_ms.total_cmp(&other.latency_ms),
        }
    }
}
