//! # Learning Loop
//!
//! Several consecutive runs against a fixed network where only a few /24
//! groups answer. After the cold-start launches the budget must move onto
//! those groups.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use scout_core::adapters::mocks::InMemoryModelStore;
    use scout_core::{
        expand_groups, BanditConfig, CandidateGenerator, ConnectProbe, GenerationMode, Ipv4Range,
        ProbeConfig, ProbeEngine, ProbeError, SharedModel, ThroughputProbe,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Groups 10.0.0.0/24 through 10.0.9.0/24 answer in 20 ms; nothing else does.
    struct FewGoodGroups;

    fn is_good(addr: IpAddr) -> bool {
        matches!(addr, IpAddr::V4(v4) if v4.octets()[2] < 10)
    }

    #[async_trait]
    impl ConnectProbe for FewGoodGroups {
        async fn connect(&self, target: SocketAddr, _timeout: Duration) -> Result<Duration, ProbeError> {
            if is_good(target.ip()) {
                Ok(Duration::from_millis(20))
            } else {
                Err(ProbeError::Timeout)
            }
        }
    }

    struct FlatThroughput(f64);

    #[async_trait]
    impl ThroughputProbe for FlatThroughput {
        async fn measure(&self, _address: IpAddr) -> Result<f64, ProbeError> {
            Ok(self.0)
        }
    }

    /// 10.0.0.0/17: 128 groups.
    fn ranges() -> Vec<Ipv4Range> {
        vec![Ipv4Range::new(Ipv4Addr::new(10, 0, 0, 0), 17).unwrap()]
    }

    fn engine() -> ProbeEngine {
        let config = ProbeConfig {
            threads: 64,
            speed_test_range: 5,
            ..Default::default()
        };
        ProbeEngine::new(config, Arc::new(FewGoodGroups), Arc::new(FlatThroughput(10.0)))
    }

    /// One launch: load, generate, probe, persist.
    async fn run_cycle(store: &Arc<InMemoryModelStore>, seed: u64) -> (GenerationMode, Vec<IpAddr>) {
        let model = SharedModel::load(store.clone(), BanditConfig::default());
        let mode = if model.is_cold_start() {
            GenerationMode::ColdStart
        } else {
            GenerationMode::Warm
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let candidates = model.with_model(|m| {
            CandidateGenerator::default().generate(&ranges(), &[], 1000, m, &mut rng)
        });
        engine().run(candidates.clone(), &model).await.unwrap();
        (mode, candidates)
    }

    fn good_share(candidates: &[IpAddr]) -> f64 {
        let good = candidates.iter().filter(|a| is_good(**a)).count();
        good as f64 / candidates.len() as f64
    }

    // =============================================================================
    // TESTS
    // =============================================================================

    #[tokio::test]
    async fn test_budget_moves_to_answering_groups() {
        let store = Arc::new(InMemoryModelStore::new());

        let mut cold_shares = Vec::new();
        for seed in 1..=3 {
            let (mode, candidates) = run_cycle(&store, seed).await;
            assert_eq!(mode, GenerationMode::ColdStart);
            assert_eq!(candidates.len(), 1000);
            cold_shares.push(good_share(&candidates));
        }

        let (mode, warm) = run_cycle(&store, 4).await;
        assert_eq!(mode, GenerationMode::Warm);

        for share in cold_shares {
            assert!(share < 0.12, "cold share {share}");
        }
        assert!(good_share(&warm) > 0.25, "warm share {}", good_share(&warm));
        assert_eq!(store.save_count(), 4);
    }

    #[tokio::test]
    async fn test_answering_groups_rank_first() {
        let store = Arc::new(InMemoryModelStore::new());
        for seed in 1..=3 {
            run_cycle(&store, seed).await;
        }

        let model = SharedModel::load(store.clone(), BanditConfig::default());
        let groups = expand_groups(&ranges());
        let mut rng = StdRng::seed_from_u64(99);
        let plan = model.with_model(|m| CandidateGenerator::default().allocate(&groups, m, &mut rng));

        let top: HashSet<u8> = plan.allocations[..10]
            .iter()
            .map(|a| a.group.base().octets()[2])
            .collect();
        assert_eq!(top, (0..10).collect::<HashSet<u8>>());
    }

    #[tokio::test]
    async fn test_launch_count_survives_every_cycle() {
        let store = Arc::new(InMemoryModelStore::new());
        for seed in 1..=5 {
            run_cycle(&store, seed).await;
        }
        assert_eq!(store.stored().unwrap().launch_count, 5);
    }
}
