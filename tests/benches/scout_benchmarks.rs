//! # Edge-Scout Benchmarks
//!
//! | Area | Operation | Target |
//! |------|-----------|--------|
//! | Generator | cold census, 10k candidates over a /12 | < 50ms |
//! | Generator | warm budget over 4096 scored groups | < 50ms |
//! | Bandit | record one outcome | < 1us |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::net::{IpAddr, Ipv4Addr};

use scout_core::{BanditModel, CandidateGenerator, Ipv4Range, ModelSnapshot, ProbeResult};

fn slash12() -> Vec<Ipv4Range> {
    vec![Ipv4Range::new(Ipv4Addr::new(104, 16, 0, 0), 12).unwrap()]
}

/// Warm model knowing every group of the /12 with random history.
fn warm_model(rng: &mut StdRng) -> BanditModel {
    let mut snapshot = ModelSnapshot::default().with_launch_count(10);
    for group in scout_core::expand_groups(&slash12()) {
        let count = rng.gen_range(1.0..20.0);
        let avg: f64 = rng.gen_range(0.0..1.0);
        snapshot = snapshot.with_group(&group.base().to_string(), count, count * avg);
    }
    BanditModel::from_snapshot(snapshot, Default::default())
}

fn bench_generator(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator");
    let ranges = slash12();
    let generator = CandidateGenerator::default();

    let cold = BanditModel::default();
    for target in [1_000usize, 10_000] {
        group.throughput(Throughput::Elements(target as u64));
        group.bench_with_input(BenchmarkId::new("cold_census", target), &target, |b, &t| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| black_box(generator.generate(&ranges, &[], t, &cold, &mut rng)))
        });
    }

    let mut rng = StdRng::seed_from_u64(2);
    let warm = warm_model(&mut rng);
    group.bench_function("warm_budget", |b| {
        b.iter(|| black_box(generator.generate(&ranges, &[], 10_000, &warm, &mut rng)))
    });

    group.finish();
}

fn bench_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("bandit");
    let mut model = BanditModel::default();
    let mut rng = StdRng::seed_from_u64(3);

    group.bench_function("record_outcome", |b| {
        b.iter(|| {
            let addr = IpAddr::V4(Ipv4Addr::from(rng.gen::<u32>() & 0x0FFF_FFFF));
            let result = ProbeResult::reachable(addr, rng.gen_range(10.0..300.0));
            black_box(model.record_outcome(&result, true))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_generator, bench_record);
criterion_main!(benches);
