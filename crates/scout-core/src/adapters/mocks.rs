//! In-memory port implementations for tests.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{ModelSnapshot, ProbeError, StoreError};
use crate::ports::{ConnectProbe, ModelStore, ThroughputProbe};

// =============================================================================
// IN-FLIGHT TRACKING
// =============================================================================

/// Counts concurrent calls and remembers the peak.
#[derive(Debug, Default)]
pub struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl InFlight {
    fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    /// Highest number of simultaneous calls seen.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Total calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

// =============================================================================
// MOCK CONNECT PROBE
// =============================================================================

/// Connect probe with scripted latencies.
///
/// Addresses without a configured latency time out.
#[derive(Debug, Default)]
pub struct MockConnectProbe {
    latencies: HashMap<IpAddr, Duration>,
    delay: Duration,
    in_flight: Arc<InFlight>,
}

impl MockConnectProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `addr` reachable with the given latency.
    pub fn set_latency(&mut self, addr: IpAddr, latency: Duration) {
        self.latencies.insert(addr, latency);
    }

    /// Sleep this long inside every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn in_flight(&self) -> Arc<InFlight> {
        Arc::clone(&self.in_flight)
    }
}

#[async_trait]
impl ConnectProbe for MockConnectProbe {
    async fn connect(&self, target: SocketAddr, _timeout: Duration) -> Result<Duration, ProbeError> {
        self.in_flight.enter();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.leave();
        self.latencies
            .get(&target.ip())
            .copied()
            .ok_or(ProbeError::Timeout)
    }
}

// =============================================================================
// MOCK THROUGHPUT PROBE
// =============================================================================

/// Throughput probe with scripted speeds.
///
/// Addresses without a configured speed fail with a transfer error.
#[derive(Debug, Default)]
pub struct MockThroughputProbe {
    speeds: HashMap<IpAddr, f64>,
    delay: Duration,
    in_flight: Arc<InFlight>,
}

impl MockThroughputProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `addr` download at `mbps`.
    pub fn set_speed(&mut self, addr: IpAddr, mbps: f64) {
        self.speeds.insert(addr, mbps);
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn in_flight(&self) -> Arc<InFlight> {
        Arc::clone(&self.in_flight)
    }
}

#[async_trait]
impl ThroughputProbe for MockThroughputProbe {
    async fn measure(&self, address: IpAddr) -> Result<f64, ProbeError> {
        self.in_flight.enter();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.leave();
        self.speeds
            .get(&address)
            .copied()
            .ok_or_else(|| ProbeError::Transfer("no route".to_string()))
    }
}

// =============================================================================
// IN-MEMORY MODEL STORE
// =============================================================================

/// Model store kept in memory.
#[derive(Debug, Default)]
pub struct InMemoryModelStore {
    snapshot: Mutex<Option<ModelSnapshot>>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl InMemoryModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `snapshot` already stored.
    pub fn with_snapshot(snapshot: ModelSnapshot) -> Self {
        let store = Self::default();
        *store.snapshot.lock() = Some(snapshot);
        store
    }

    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Currently stored snapshot.
    pub fn stored(&self) -> Option<ModelSnapshot> {
        self.snapshot.lock().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl ModelStore for InMemoryModelStore {
    fn load(&self) -> Result<Option<ModelSnapshot>, StoreError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StoreError::Corrupt("injected load failure".to_string()));
        }
        Ok(self.snapshot.lock().clone())
    }

    fn save(&self, snapshot: &ModelSnapshot) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Io {
                path: "memory".to_string(),
                message: "injected save failure".to_string(),
            });
        }
        *self.snapshot.lock() = Some(snapshot.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
