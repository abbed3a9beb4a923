//! Bridson Poisson-disc sampling.
//!
//! Points are produced one per call, in a draw order that is fully determined
//! by the [`RandomSource`]: the seed point takes two draws (x, then y); every
//! later point takes one draw to pick an active sample and two draws per
//! candidate (angle, then distance). Replaying a seed therefore replays the
//! exact point sequence.
use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::iter::FusedIterator;

use glam::DVec2;
use mint::Vector2;
use tracing::debug;

use crate::random::RandomSource;
use crate::sampling::{PositionSampling, Sample};

/// Candidates tried around an active sample before it is retired.
pub const MAX_ATTEMPTS: usize = 30;

/// Batch Poisson-disc strategy: runs a [`PoissonDiscSampler`] to exhaustion.
#[derive(Debug, Clone)]
pub struct PoissonDiscSampling {
    /// Minimum distance between samples.
    pub radius: f64,
}

impl PoissonDiscSampling {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl PositionSampling for PoissonDiscSampling {
    fn generate(
        &self,
        domain_extent: Vector2<f64>,
        rng: &mut dyn RandomSource,
    ) -> Vec<Vector2<f64>> {
        let extent = DVec2::from(domain_extent);
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(self.radius) || !valid(extent.x) || !valid(extent.y) {
            return Vec::new();
        }

        let mut sampler = PoissonDiscSampler::new(extent.x, extent.y, self.radius);
        sampler.samples(rng).map(Into::into).collect()
    }
}

/// Incremental Poisson-disc sampler over `[0, width) x [0, height)`.
///
/// Owns its background grid and active queue; the random source is lent to
/// each [`PoissonDiscSampler::next_sample`] call. There is no reset: build a
/// new sampler to start over.
#[derive(Debug, Clone)]
pub struct PoissonDiscSampler {
    width: f64,
    height: f64,
    radius_squared: f64,
    /// `3 r²`: candidate distances are `sqrt(u * 3r² + r²)`, i.e. in `[r, 2r)`.
    annulus_span: f64,
    cell_size: f64,
    grid_width: usize,
    grid_height: usize,
    grid: Vec<Option<DVec2>>,
    queue: Vec<DVec2>,
    sample_count: usize,
    exhausted: bool,
}

impl PoissonDiscSampler {
    /// Callers must pass positive, finite values.
    pub fn new(width: f64, height: f64, radius: f64) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "domain must be > 0");
        debug_assert!(radius > 0.0, "radius must be > 0");
        let radius_squared = radius * radius;
        let cell_size = radius * FRAC_1_SQRT_2;
        let grid_width = ((width / cell_size).ceil() as usize).max(1);
        let grid_height = ((height / cell_size).ceil() as usize).max(1);

        Self {
            width,
            height,
            radius_squared,
            annulus_span: 3.0 * radius_squared,
            cell_size,
            grid_width,
            grid_height,
            grid: vec![None; grid_width * grid_height],
            queue: Vec::new(),
            sample_count: 0,
            exhausted: false,
        }
    }

    /// Number of points accepted so far.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Number of points still eligible to spawn neighbours.
    pub fn active_count(&self) -> usize {
        self.queue.len()
    }

    /// Grid dimensions `(columns, rows)`.
    pub fn grid_dimensions(&self) -> (usize, usize) {
        (self.grid_width, self.grid_height)
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Produces the next point, or [`Sample::Exhausted`] once no active
    /// samples remain. Exhaustion is permanent.
    pub fn next_sample<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Sample {
        if self.sample_count == 0 {
            let x = rng.random() * self.width;
            let y = rng.random() * self.height;
            return Sample::Point(self.accept(DVec2::new(x, y)));
        }

        while !self.queue.is_empty() {
            let len = self.queue.len();
            let index = ((rng.random() * len as f64) as usize).min(len - 1);
            let active = self.queue[index];

            for _ in 0..MAX_ATTEMPTS {
                let angle = 2.0 * PI * rng.random();
                let distance = (rng.random() * self.annulus_span + self.radius_squared).sqrt();
                let candidate = DVec2::new(
                    active.x + distance * angle.cos(),
                    active.y + distance * angle.sin(),
                );

                if self.in_domain(candidate) && self.is_far(candidate) {
                    return Sample::Point(self.accept(candidate));
                }
            }

            // Retired from the queue only; the grid keeps it for distance checks.
            self.queue.swap_remove(index);
        }

        if !self.exhausted {
            self.exhausted = true;
            debug!(
                samples = self.sample_count,
                width = self.width,
                height = self.height,
                "poisson disc sampler exhausted"
            );
        }
        Sample::Exhausted
    }

    /// Borrows the sampler as an iterator that ends at exhaustion.
    pub fn samples<'a, R: RandomSource + ?Sized>(&'a mut self, rng: &'a mut R) -> Samples<'a, R> {
        Samples { sampler: self, rng }
    }

    #[inline]
    fn in_domain(&self, point: DVec2) -> bool {
        0.0 <= point.x && point.x < self.width && 0.0 <= point.y && point.y < self.height
    }

    #[inline]
    fn cell_of(&self, point: DVec2) -> (usize, usize) {
        // Float-to-usize truncates toward zero; points are never negative here.
        let x = ((point.x / self.cell_size) as usize).min(self.grid_width - 1);
        let y = ((point.y / self.cell_size) as usize).min(self.grid_height - 1);
        (x, y)
    }

    /// True when no accepted point in the surrounding 5x5 cells is closer than the radius.
    fn is_far(&self, point: DVec2) -> bool {
        let (gx, gy) = self.cell_of(point);
        let start_x = gx.saturating_sub(2);
        let end_x = (gx + 3).min(self.grid_width);
        let start_y = gy.saturating_sub(2);
        let end_y = (gy + 3).min(self.grid_height);

        for y in start_y..end_y {
            let row = y * self.grid_width;
            for x in start_x..end_x {
                if let Some(existing) = self.grid[row + x] {
                    if existing.distance_squared(point) < self.radius_squared {
                        return false;
                    }
                }
            }
        }

        true
    }

    fn accept(&mut self, point: DVec2) -> DVec2 {
        let (gx, gy) = self.cell_of(point);
        self.grid[gy * self.grid_width + gx] = Some(point);
        self.queue.push(point);
        self.sample_count += 1;
        point
    }
}

/// Iterator over the remaining points of a [`PoissonDiscSampler`].
pub struct Samples<'a, R: ?Sized> {
    sampler: &'a mut PoissonDiscSampler,
    rng: &'a mut R,
}

impl<R: RandomSource + ?Sized> Iterator for Samples<'_, R> {
    type Item = DVec2;

    fn next(&mut self) -> Option<DVec2> {
        self.sampler.next_sample(self.rng).point()
    }
}

impl<R: RandomSource + ?Sized> FusedIterator for Samples<'_, R> {}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::random::{RngCoreSource, SeededRng};

    fn pairwise_min_distance(points: &[DVec2]) -> f64 {
        let mut min = f64::MAX;
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let dist = points[i].distance(points[j]);
                if dist < min {
                    min = dist;
                }
            }
        }
        min
    }

    #[test]
    fn sampler_initializes_grid_dimensions() {
        let sampler = PoissonDiscSampler::new(1000.0, 500.0, 2.0);
        let cell = 2.0 * FRAC_1_SQRT_2;
        assert_eq!(sampler.cell_size(), cell);
        assert_eq!(
            sampler.grid_dimensions(),
            (
                (1000.0 / cell).ceil() as usize,
                (500.0 / cell).ceil() as usize
            )
        );
    }

    #[test]
    fn first_sample_is_two_scaled_draws() {
        let mut rng = SeededRng::new(1000);
        let mut sampler = PoissonDiscSampler::new(1000.0, 1000.0, 2.0);
        let first = sampler.next_sample(&mut rng).point().expect("first sample");

        let mut reference = SeededRng::new(1000);
        let x = reference.random() * 1000.0;
        let y = reference.random() * 1000.0;
        assert_eq!(first, DVec2::new(x, y));
        assert!((first.x - 81.862_997_256_515_77).abs() < 1e-9);
        assert!((first.y - 619.058_641_975_308_7).abs() < 1e-9);
        assert_eq!(rng, reference);
    }

    #[test]
    fn is_far_rejects_close_neighbors() {
        let mut sampler = PoissonDiscSampler::new(10.0, 10.0, 1.0);
        sampler.accept(DVec2::new(5.0, 5.0));

        assert!(!sampler.is_far(DVec2::new(5.5, 5.0)));
        assert!(!sampler.is_far(DVec2::new(5.7, 5.7)));
        assert!(sampler.is_far(DVec2::new(6.0, 5.0)));
        assert!(sampler.is_far(DVec2::new(6.5, 6.5)));
    }

    #[test]
    fn samples_respect_bounds_and_separation() {
        let mut rng = SeededRng::new(1000);
        let mut sampler = PoissonDiscSampler::new(60.0, 40.0, 2.0);
        let points: Vec<DVec2> = sampler.samples(&mut rng).collect();

        assert!(points.len() > 100);
        for p in &points {
            assert!(p.x >= 0.0 && p.x < 60.0);
            assert!(p.y >= 0.0 && p.y < 40.0);
        }
        assert!(pairwise_min_distance(&points) >= 2.0);
    }

    #[test]
    fn exhaustion_is_permanent_and_drains_queue() {
        let mut rng = SeededRng::new(5);
        let mut sampler = PoissonDiscSampler::new(20.0, 20.0, 1.5);
        let count = sampler.samples(&mut rng).count();

        assert_eq!(count, sampler.sample_count());
        assert_eq!(sampler.active_count(), 0);
        let before = rng.clone();
        assert!(sampler.next_sample(&mut rng).is_exhausted());
        assert!(sampler.next_sample(&mut rng).is_exhausted());
        assert_eq!(rng, before, "exhausted sampler must not draw");
    }

    #[test]
    fn terminates_for_various_domains() {
        let cases = [
            (1.0, 1.0, 5.0),
            (3.0, 200.0, 0.7),
            (50.0, 2.0, 1.0),
            (25.0, 25.0, 0.9),
        ];
        for (w, h, r) in cases {
            let mut rng = SeededRng::new(77);
            let mut sampler = PoissonDiscSampler::new(w, h, r);
            let points: Vec<DVec2> = sampler.samples(&mut rng).collect();
            assert!(!points.is_empty());
            assert!(sampler.next_sample(&mut rng).is_exhausted());
        }
    }

    #[test]
    fn radius_larger_than_domain_yields_single_point() {
        let mut rng = SeededRng::new(3);
        let mut sampler = PoissonDiscSampler::new(1.0, 1.0, 10.0);
        assert_eq!(sampler.samples(&mut rng).count(), 1);
    }

    #[test]
    fn same_seed_replays_same_sequence() {
        let run = |seed| {
            let mut rng = SeededRng::new(seed);
            let mut sampler = PoissonDiscSampler::new(30.0, 30.0, 1.0);
            sampler.samples(&mut rng).collect::<Vec<_>>()
        };
        assert_eq!(run(1000), run(1000));
        assert_ne!(run(1000), run(1001));
    }

    #[test]
    fn std_rng_source_keeps_invariants() {
        let mut rng = RngCoreSource::new(StdRng::seed_from_u64(123));
        let sampling = PoissonDiscSampling::new(0.5);
        let points = sampling.generate(DVec2::new(10.0, 8.0).into(), &mut rng);

        assert!(!points.is_empty());
        let points: Vec<DVec2> = points.into_iter().map(DVec2::from).collect();
        for p in &points {
            assert!(p.x >= 0.0 && p.x < 10.0);
            assert!(p.y >= 0.0 && p.y < 8.0);
        }
        assert!(pairwise_min_distance(&points) >= 0.5);
    }

    #[test]
    fn invalid_parameters_return_no_points() {
        let mut rng = SeededRng::new(1);
        assert!(PoissonDiscSampling::new(0.0)
            .generate(DVec2::new(10.0, 10.0).into(), &mut rng)
            .is_empty());
        assert!(PoissonDiscSampling::new(f64::NAN)
            .generate(DVec2::new(10.0, 10.0).into(), &mut rng)
            .is_empty());
        assert!(PoissonDiscSampling::new(1.0)
            .generate(DVec2::new(-10.0, 10.0).into(), &mut rng)
            .is_empty());
    }
}
