//! Planar circles.
use std::f64::consts::PI;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::GeoConfig;
use crate::error::Result;
use crate::random::RandomSource;
use crate::shapes::{place_capped, place_unbounded, planar_position, ShapeKind};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
}

impl Circle {
    pub fn contains(&self, point: DVec2) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }

    /// True when the circle's bounding square lies inside the domain.
    pub fn is_within(&self, config: &GeoConfig) -> bool {
        self.center.x + self.radius <= config.x_max()
            && self.center.x - self.radius >= config.x_min()
            && self.center.y + self.radius <= config.y_max()
            && self.center.y - self.radius >= config.y_min()
    }
}

/// Radius of a circle with the enclosing area for `points` samples.
pub fn circle_radius(config: &GeoConfig, points: usize) -> f64 {
    (config.enclosing_area(points) / PI).sqrt()
}

/// A circle enclosing roughly `points` samples; only the center is random.
pub fn random_circle<R: RandomSource + ?Sized>(
    config: &GeoConfig,
    points: usize,
    rng: &mut R,
) -> Circle {
    let radius = circle_radius(config, points);
    place_unbounded(|| draw_circle(config, radius, rng))
}

/// Like [`random_circle`], giving up after [`GeoConfig::max_attempts`] draws.
pub fn try_random_circle<R: RandomSource + ?Sized>(
    config: &GeoConfig,
    points: usize,
    rng: &mut R,
) -> Result<Circle> {
    let radius = circle_radius(config, points);
    place_capped(ShapeKind::Circle, config.max_attempts, || {
        draw_circle(config, radius, rng)
    })
}

fn draw_circle<R: RandomSource + ?Sized>(config: &GeoConfig, radius: f64, rng: &mut R) -> Option<Circle> {
    let candidate = Circle {
        center: planar_position(config, rng),
        radius,
    };
    candidate.is_within(config).then_some(candidate)
}
