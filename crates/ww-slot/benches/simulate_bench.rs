//! Spin Engine Benchmarks
//!
//! Full spins on a virtual clock, and the per-reel finalize draw.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ww_slot::{ProbabilityModel, Simulator, SlotConfig, SymbolSet, TimingProfile};

const SPIN_COUNTS: &[u64] = &[100, 1_000];

/// Benchmark complete spins through the state machine
fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");

    for profile in [TimingProfile::Normal, TimingProfile::Turbo] {
        for &spins in SPIN_COUNTS {
            group.throughput(Throughput::Elements(spins));

            let id = BenchmarkId::new(profile.display_name(), spins);
            group.bench_with_input(id, &spins, |b, &spins| {
                b.iter(|| {
                    let config = SlotConfig::default().with_timing(profile);
                    let mut sim = Simulator::seeded(config, 42).unwrap();
                    black_box(sim.run(spins).unwrap())
                })
            });
        }
    }

    group.finish();
}

/// Benchmark the stop-time finalize draw
fn bench_finalize(c: &mut Criterion) {
    let config = SlotConfig::default();
    let model = ProbabilityModel::new(&config.probability);
    let symbols = SymbolSet::wild_west();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("finalize_third_reel", |b| {
        b.iter(|| {
            black_box(model.finalize(
                2,
                black_box(3),
                black_box(&[3, 3]),
                symbols.jackpot(),
                &mut rng,
            ))
        })
    });
}

criterion_group!(benches, bench_simulate, bench_finalize);
criterion_main!(benches);
