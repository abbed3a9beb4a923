mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use geo2d_workload::config::GeoConfig;
use geo2d_workload::random::RngCoreSource;
use geo2d_workload::sampling::{PoissonDiscSampler, PoissonDiscSampling, PositionSampling};
use rand::rngs::StdRng;
use rand::SeedableRng;

const RADII: [f64; 5] = [32.0, 16.0, 8.0, 4.0, 2.0];

/// Number of samples a fixture-seeded run produces, for throughput reporting.
fn fixture_sample_count(config: &GeoConfig, radius: f64) -> usize {
    PoissonDiscSampler::new(config.width, config.height, radius)
        .samples(&mut config.rng())
        .count()
}

fn sampling_seeded_benches(c: &mut Criterion) {
    let config = common::fixture_config();
    let extent = config.extent();
    let mut group = c.benchmark_group("sampling/poisson_disc/seeded");

    for &radius in &RADII {
        let expected = fixture_sample_count(&config, radius);
        group.throughput(common::items(expected));

        group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |b, &r| {
            b.iter(|| {
                let mut rng = config.rng();
                let mut sampler = PoissonDiscSampler::new(extent.x, extent.y, r);
                black_box(sampler.samples(&mut rng).count());
            });
        });
    }

    group.finish();
}

fn sampling_std_rng_benches(c: &mut Criterion) {
    let extent = common::fixture_config().extent();
    let mut group = c.benchmark_group("sampling/poisson_disc/std_rng");

    for &radius in &RADII {
        let strategy = PoissonDiscSampling::new(radius);
        let mut rng_est = RngCoreSource::new(StdRng::seed_from_u64(0xBEEFu64 ^ (radius as u64)));
        let expected = strategy.generate(extent.into(), &mut rng_est).len();
        group.throughput(common::items(expected));

        let mut rng = RngCoreSource::new(StdRng::seed_from_u64(0xC0FFEEu64 ^ (radius as u64)));
        group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |b, _| {
            b.iter(|| {
                let pts = strategy.generate(extent.into(), &mut rng);
                black_box(pts.len());
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = sampling_seeded_benches, sampling_std_rng_benches
}
criterion_main!(benches);
