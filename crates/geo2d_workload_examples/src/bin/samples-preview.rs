use geo2d_workload::prelude::*;
use geo2d_workload_examples::{init_tracing, render_preview_to_png, RenderConfig};
use glam::DVec2;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = GeoConfig::new(200.0, 200.0, 2.0);
    config.validate()?;
    let mut rng = config.rng();

    let mut sampler = PoissonDiscSampler::new(config.width, config.height, config.radius);
    let half = config.extent() / 2.0;
    let points: Vec<DVec2> = sampler.samples(&mut rng).map(|p| p - half).collect();
    info!(points = points.len(), "sampled domain");

    let shapes: Vec<Shape> = [ShapeKind::Box, ShapeKind::Hexagon, ShapeKind::Circle]
        .into_iter()
        .flat_map(|kind| {
            (0..3)
                .map(|_| kind.try_generate(&config, 300, &mut rng))
                .collect::<Vec<_>>()
        })
        .collect::<Result<_>>()?;

    for shape in &shapes {
        let inside = points.iter().filter(|&&p| shape.contains(p)).count();
        info!(kind = %shape.kind(), inside, target = 300, "shape coverage");
    }

    let render = RenderConfig::new((800, 800), config.extent())
        .with_background([255, 255, 255])
        .with_point_style([30, 30, 30], 1)
        .with_shape_color([200, 30, 30]);
    let out = "samples-preview.png";
    render_preview_to_png(&points, &shapes, &render, out)?;
    info!(path = out, "preview written");
    Ok(())
}
