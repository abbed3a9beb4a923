//! Shapes sized to enclose a target number of sampled points.
//!
//! A Poisson-disc point set has a roughly constant density, so a target count
//! `n` maps to an area through [`enclosing_area`]. Each generator turns that
//! area into a concrete shape and places it with draws from a
//! [`RandomSource`], rejecting placements that leave the bounding domain.
//!
//! Every generator has an infallible form that retries until a shape fits and a
//! `try_` form that honours [`GeoConfig::max_attempts`].
use std::f64::consts::PI;
use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::GeoConfig;
use crate::error::{Error, Result};
use crate::random::RandomSource;

pub mod bounding_box;
pub mod circle;
pub mod hexagon;
pub mod spherical_circle;

pub use bounding_box::{random_box, try_random_box, GeoBox};
pub use circle::{random_circle, try_random_circle, Circle};
pub use hexagon::{random_hexagon, try_random_hexagon, HexagonPlacement, RegularHexagon};
pub use spherical_circle::{random_spherical_circle, SphericalCircle};

/// Extra area per point compensating for the sparser edges of a point set.
pub const AREA_MARGIN: f64 = 1.0 / 25.0;

/// Drawn coordinates are quantised to this many steps per unit.
const COORDINATE_STEPS: f64 = 10_000.0;

/// Area expected to hold `points` samples separated by `radius`.
pub fn enclosing_area(points: usize, radius: f64) -> f64 {
    let n = points as f64;
    (n + n * AREA_MARGIN) * (radius * PI)
}

/// The shape families a workload can query with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Box,
    Hexagon,
    Circle,
    SphericalCircle,
}

impl ShapeKind {
    /// All kinds in workload order.
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Box,
        ShapeKind::Hexagon,
        ShapeKind::Circle,
        ShapeKind::SphericalCircle,
    ];

    /// Generates a shape of this kind, retrying until it fits.
    pub fn generate<R: RandomSource + ?Sized>(
        self,
        config: &GeoConfig,
        points: usize,
        rng: &mut R,
    ) -> Shape {
        match self {
            ShapeKind::Box => Shape::Box(random_box(config, points, rng)),
            ShapeKind::Hexagon => Shape::Hexagon(random_hexagon(config, points, rng)),
            ShapeKind::Circle => Shape::Circle(random_circle(config, points, rng)),
            ShapeKind::SphericalCircle => {
                Shape::SphericalCircle(random_spherical_circle(config, points, rng))
            }
        }
    }

    /// Generates a shape of this kind within the configured attempt cap.
    pub fn try_generate<R: RandomSource + ?Sized>(
        self,
        config: &GeoConfig,
        points: usize,
        rng: &mut R,
    ) -> Result<Shape> {
        Ok(match self {
            ShapeKind::Box => Shape::Box(try_random_box(config, points, rng)?),
            ShapeKind::Hexagon => Shape::Hexagon(try_random_hexagon(config, points, rng)?),
            ShapeKind::Circle => Shape::Circle(try_random_circle(config, points, rng)?),
            ShapeKind::SphericalCircle => {
                Shape::SphericalCircle(random_spherical_circle(config, points, rng))
            }
        })
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShapeKind::Box => "box",
            ShapeKind::Hexagon => "hexagon",
            ShapeKind::Circle => "circle",
            ShapeKind::SphericalCircle => "spherical circle",
        })
    }
}

/// Any generated shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Box(GeoBox),
    Hexagon(RegularHexagon),
    Circle(Circle),
    SphericalCircle(SphericalCircle),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Box(_) => ShapeKind::Box,
            Shape::Hexagon(_) => ShapeKind::Hexagon,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::SphericalCircle(_) => ShapeKind::SphericalCircle,
        }
    }

    /// Planar containment; spherical circles compare great-circle distance in radians.
    pub fn contains(&self, point: DVec2) -> bool {
        match self {
            Shape::Box(b) => b.contains(point),
            Shape::Hexagon(h) => h.contains(point),
            Shape::Circle(c) => c.contains(point),
            Shape::SphericalCircle(c) => c.contains(point),
        }
    }

    /// A point inside the shape, used to re-insert documents a query removed.
    pub fn representative_point(&self) -> DVec2 {
        match self {
            Shape::Box(b) => b.midpoint(),
            Shape::Hexagon(h) => h.midpoint(),
            Shape::Circle(c) => c.center,
            Shape::SphericalCircle(c) => c.center,
        }
    }
}

/// Uniform position in the planar domain, quantised to [`COORDINATE_STEPS`].
pub(crate) fn planar_position<R: RandomSource + ?Sized>(config: &GeoConfig, rng: &mut R) -> DVec2 {
    let x = rng.next_int(config.width * COORDINATE_STEPS) / COORDINATE_STEPS - config.width / 2.0;
    let y = rng.next_int(config.height * COORDINATE_STEPS) / COORDINATE_STEPS - config.height / 2.0;
    DVec2::new(x, y)
}

/// Uniform `(longitude, latitude)` in the spherical domain.
pub(crate) fn lon_lat_position<R: RandomSource + ?Sized>(config: &GeoConfig, rng: &mut R) -> DVec2 {
    let lon = rng.next_int(config.sphere_width * COORDINATE_STEPS) / COORDINATE_STEPS
        - config.sphere_width / 2.0;
    let lat = rng.next_int(config.sphere_height * COORDINATE_STEPS) / COORDINATE_STEPS
        - config.sphere_height / 2.0;
    DVec2::new(lon, lat)
}

/// Repeats `attempt` until it yields a shape.
pub(crate) fn place_unbounded<T>(mut attempt: impl FnMut() -> Option<T>) -> T {
    loop {
        if let Some(shape) = attempt() {
            return shape;
        }
    }
}

/// Repeats `attempt` until it yields a shape or `max_attempts` is spent.
pub(crate) fn place_capped<T>(
    shape: ShapeKind,
    max_attempts: Option<u32>,
    mut attempt: impl FnMut() -> Option<T>,
) -> Result<T> {
    let Some(cap) = max_attempts else {
        return Ok(place_unbounded(attempt));
    };
    for _ in 0..cap {
        if let Some(found) = attempt() {
            return Ok(found);
        }
    }
    warn!(%shape, attempts = cap, "shape placement gave up");
    Err(Error::PlacementExhausted {
        shape,
        attempts: cap,
    })
}
