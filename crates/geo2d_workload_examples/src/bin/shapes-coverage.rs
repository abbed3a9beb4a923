use clap::Parser;
use geo2d_workload::prelude::*;
use geo2d_workload_examples::init_tracing;
use glam::DVec2;
use tracing::info;

/// Measures how many sampled points generated shapes actually enclose.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Target point counts to size shapes for.
    #[arg(long, value_delimiter = ',', default_values_t = [30usize, 1000])]
    points: Vec<usize>,

    /// Shapes generated per kind and target.
    #[arg(long, default_value_t = 50)]
    shapes: usize,

    #[arg(long, default_value_t = 1000)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = GeoConfig::default().with_seed(args.seed);
    config.validate()?;
    let mut rng = config.rng();

    let grid = centered_samples(config.extent(), config.radius, &mut rng);
    let sphere = centered_samples(config.sphere_extent(), config.radius, &mut rng);
    info!(grid = grid.len(), sphere = sphere.len(), "sampled domains");

    for &target in &args.points {
        for kind in ShapeKind::ALL {
            let points = match kind {
                ShapeKind::SphericalCircle => &sphere,
                _ => &grid,
            };
            let mut total = 0usize;
            for _ in 0..args.shapes {
                let shape = kind.try_generate(&config, target, &mut rng)?;
                total += points.iter().filter(|&&p| shape.contains(p)).count();
            }
            let mean = total as f64 / args.shapes.max(1) as f64;
            info!(
                kind = %kind,
                target,
                mean_enclosed = mean,
                ratio = mean / target.max(1) as f64,
                "coverage"
            );
        }
    }
    Ok(())
}

fn centered_samples(extent: DVec2, radius: f64, rng: &mut SeededRng) -> Vec<DVec2> {
    let mut sampler = PoissonDiscSampler::new(extent.x, extent.y, radius);
    let half = extent / 2.0;
    sampler.samples(rng).map(|p| p - half).collect()
}
