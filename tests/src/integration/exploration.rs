//! # Exploration Override
//!
//! A group the stored model has never seen must get a full elite budget on
//! the next warm launch, ahead of every well-scored known group.

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;
    use std::time::Duration;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use scout_core::adapters::mocks::{MockConnectProbe, MockThroughputProbe};
    use scout_core::{
        BanditConfig, CandidateGenerator, GroupId, Ipv4Range, JsonModelStore, ModelSnapshot,
        ModelStore, ProbeConfig, ProbeEngine, SharedModel, Tier,
    };

    const NEW_GROUP: Ipv4Addr = Ipv4Addr::new(172, 16, 5, 0);

    /// 150 known groups with a strong history, saved to disk.
    fn seeded_store(dir: &std::path::Path) -> Arc<JsonModelStore> {
        let mut snapshot = ModelSnapshot::default().with_launch_count(8);
        for c in 0..150u8 {
            snapshot = snapshot.with_group(&format!("10.1.{c}.0"), 10.0, 8.0);
        }
        let store = Arc::new(JsonModelStore::new(dir.join("ucb_model.json")));
        store.save(&snapshot).unwrap();
        store
    }

    fn ranges() -> Vec<Ipv4Range> {
        let mut ranges: Vec<Ipv4Range> = (0..150u8)
            .map(|c| Ipv4Range::new(Ipv4Addr::new(10, 1, c, 0), 24).unwrap())
            .collect();
        ranges.push(Ipv4Range::new(NEW_GROUP, 24).unwrap());
        ranges
    }

    fn in_new_group(addr: &IpAddr) -> bool {
        GroupId::of(addr).map(|g| g.base()) == Some(NEW_GROUP)
    }

    #[test]
    fn test_unseen_group_gets_elite_quota() {
        let dir = tempfile::tempdir().unwrap();
        let model = SharedModel::load(seeded_store(dir.path()), BanditConfig::default());
        assert!(!model.is_cold_start());

        let generator = CandidateGenerator::default();
        let mut rng = StdRng::seed_from_u64(11);
        let plan = model.with_model(|m| generator.allocate(&ranges(), m, &mut rng));
        assert_eq!(plan.allocations[0].group.base(), NEW_GROUP);
        assert_eq!(plan.allocations[0].tier, Tier::Elite);
        assert_eq!(plan.allocations[0].quota, 5);

        let mut rng = StdRng::seed_from_u64(11);
        let candidates =
            model.with_model(|m| generator.generate(&ranges(), &[], 1000, m, &mut rng));
        assert_eq!(candidates.iter().filter(|a| in_new_group(a)).count(), 5);
    }

    #[tokio::test]
    async fn test_unseen_group_is_learned_after_probing() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(dir.path());
        let model = SharedModel::load(store.clone(), BanditConfig::default());

        let mut rng = StdRng::seed_from_u64(12);
        let candidates = model.with_model(|m| {
            CandidateGenerator::default().generate(&ranges(), &[], 1000, m, &mut rng)
        });
        let mut connect = MockConnectProbe::new();
        for addr in candidates.iter().filter(|a| in_new_group(a)) {
            connect.set_latency(*addr, Duration::from_millis(30));
        }
        let engine = ProbeEngine::new(
            ProbeConfig::default(),
            Arc::new(connect),
            Arc::new(MockThroughputProbe::new()),
        );

        let report = engine.run(candidates, &model).await.unwrap();

        assert_eq!(report.survivors.len(), 5);
        let stored = store.load().unwrap().unwrap();
        let record = stored.subnets["172.16.5.0"];
        // 5 connects + 5 failed downloads, decayed once
        assert!((record.count - 10.0 * 0.85).abs() < 1e-9);
        assert_eq!(stored.launch_count, 9);
    }
}
