//! # Interrupted Runs
//!
//! The model file is written once, after Stage 2. A run abandoned before
//! that point leaves the stored model exactly as it was.

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;
    use std::time::Duration;

    use scout_core::adapters::mocks::{MockConnectProbe, MockThroughputProbe};
    use scout_core::{
        BanditConfig, JsonModelStore, ModelSnapshot, ModelStore, ProbeConfig, ProbeEngine,
        SharedModel,
    };

    fn addresses() -> Vec<IpAddr> {
        (1..=20).map(|d| IpAddr::V4(Ipv4Addr::new(10, 9, 0, d))).collect()
    }

    fn slow_engine() -> ProbeEngine {
        let config = ProbeConfig {
            threads: 2,
            ..Default::default()
        };
        ProbeEngine::new(
            config,
            Arc::new(MockConnectProbe::new().with_delay(Duration::from_millis(200))),
            Arc::new(MockThroughputProbe::new()),
        )
    }

    #[tokio::test]
    async fn test_abandoned_run_leaves_model_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ucb_model.json");
        let store = Arc::new(JsonModelStore::new(&path));
        store
            .save(&ModelSnapshot::default().with_group("10.9.0.0", 3.0, 1.5).with_launch_count(2))
            .unwrap();
        let before = std::fs::read(&path).unwrap();

        let model = SharedModel::load(store.clone(), BanditConfig::default());
        let outcome =
            tokio::time::timeout(Duration::from_millis(100), slow_engine().run(addresses(), &model))
                .await;

        assert!(outcome.is_err(), "run should still be in Stage 1");
        assert_eq!(std::fs::read(&path).unwrap(), before);
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_completed_run_replaces_model_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ucb_model.json");
        let store = Arc::new(JsonModelStore::new(&path));
        store
            .save(&ModelSnapshot::default().with_launch_count(2))
            .unwrap();

        let model = SharedModel::load(store.clone(), BanditConfig::default());
        let engine = ProbeEngine::new(
            ProbeConfig::default(),
            Arc::new(MockConnectProbe::new()),
            Arc::new(MockThroughputProbe::new()),
        );
        engine.run(addresses(), &model).await.unwrap();

        let stored = store.load().unwrap().unwrap();
        assert_eq!(stored.launch_count, 3);
        assert!((stored.subnets["10.9.0.0"].count - 20.0 * 0.85).abs() < 1e-9);
    }
}
