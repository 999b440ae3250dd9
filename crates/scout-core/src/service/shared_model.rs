//! Synchronized access to the bandit model.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::domain::{BanditConfig, BanditModel, GroupId, ProbeResult};
use crate::ports::ModelStore;

/// The bandit model shared by all probe workers of a run.
///
/// All reads and writes take the same lock, so concurrent
/// `record_outcome` calls never lose updates.
#[derive(Clone)]
pub struct SharedModel {
    /// The model
    inner: Arc<Mutex<BanditModel>>,
    /// Where the model is persisted
    store: Arc<dyn ModelStore>,
}

impl SharedModel {
    /// Wrap an existing model.
    pub fn new(model: BanditModel, store: Arc<dyn ModelStore>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(model)),
            store,
        }
    }

    /// Load the model from `store` and count this launch.
    ///
    /// A missing or unreadable model starts empty; loading never fails.
    pub fn load(store: Arc<dyn ModelStore>, config: BanditConfig) -> Self {
        let mut model = match store.load() {
            Ok(Some(snapshot)) => BanditModel::from_snapshot(snapshot, config),
            Ok(None) => {
                info!("[bandit] No stored model, starting fresh");
                BanditModel::new(config)
            }
            Err(e) => {
                warn!("[bandit] Failed to load model, starting fresh: {}", e);
                BanditModel::new(config)
            }
        };
        model.begin_launch();
        info!(
            "[bandit] Model ready: launch {}, {} groups, {:.1} samples",
            model.launch_count(),
            model.group_count(),
            model.total_samples()
        );
        Self::new(model, store)
    }

    /// Fold one probe outcome into the model.
    pub fn record_outcome(&self, result: &ProbeResult, tcp_only: bool) -> Option<f64> {
        self.inner.lock().record_outcome(result, tcp_only)
    }

    /// UCB score of a group.
    pub fn score(&self, group: &GroupId) -> f64 {
        self.inner.lock().score(group)
    }

    /// Whether the generator should use the cold-start census.
    pub fn is_cold_start(&self) -> bool {
        self.inner.lock().is_cold_start()
    }

    /// Run `f` against the model while holding the lock.
    pub fn with_model<T>(&self, f: impl FnOnce(&BanditModel) -> T) -> T {
        f(&self.inner.lock())
    }

    /// Decay and prune the model, then write it to the store.
    ///
    /// Best-effort: a failed write is logged and dropped.
    pub fn decay_and_persist(&self) {
        let snapshot = {
            let mut model = self.inner.lock();
            let pruned = model.decay();
            info!(
                "[bandit] Decayed model: {} groups kept, {} pruned",
                model.group_count(),
                pruned
            );
            model.snapshot()
        };
        if let Err(e) = self.store.save(&snapshot) {
            warn!("[bandit] Failed to persist model: {}", e);
        }
    }
}

impl std::fmt::Debug for SharedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedModel")
            .field("model", &*self.inner.lock())
            .finish_non_exhaustive()
    }
}
