mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use geo2d_workload::shapes::{HexagonPlacement, ShapeKind};

const POINT_COUNTS: [usize; 3] = [30, 1000, 10_000];
const SHAPES_PER_ITER: usize = 100;

fn shape_generation_benches(c: &mut Criterion) {
    let config = common::fixture_config();

    for kind in ShapeKind::ALL {
        let mut group = c.benchmark_group(format!("shapes/{kind}"));
        group.throughput(common::items(SHAPES_PER_ITER));

        for &points in &POINT_COUNTS {
            let mut rng = config.rng();
            group.bench_with_input(BenchmarkId::from_parameter(points), &points, |b, &n| {
                b.iter(|| {
                    for _ in 0..SHAPES_PER_ITER {
                        black_box(kind.generate(&config, n, &mut rng));
                    }
                });
            });
        }

        group.finish();
    }
}

fn contained_hexagon_benches(c: &mut Criterion) {
    let config = common::fixture_config().with_hexagon_placement(HexagonPlacement::Contained);
    let mut group = c.benchmark_group("shapes/hexagon_contained");
    group.throughput(common::items(SHAPES_PER_ITER));

    for &points in &POINT_COUNTS {
        let mut rng = config.rng();
        group.bench_with_input(BenchmarkId::from_parameter(points), &points, |b, &n| {
            b.iter(|| {
                for _ in 0..SHAPES_PER_ITER {
                    black_box(ShapeKind::Hexagon.generate(&config, n, &mut rng));
                }
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = shape_generation_benches, contained_hexagon_benches
}
criterion_main!(benches);
