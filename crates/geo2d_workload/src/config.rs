//! Generator configuration.
//!
//! [`GeoConfig`] replaces ambient module state: every sampler, shape generator
//! and workload assembler receives it by reference. The defaults reproduce the
//! fixture constants (a 1000 x 1000 grid, separation radius 2, seed 1000).
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::random::SeededRng;
use crate::shapes::{enclosing_area, HexagonPlacement};

pub const DEFAULT_WIDTH: f64 = 1000.0;
pub const DEFAULT_HEIGHT: f64 = 1000.0;
pub const DEFAULT_RADIUS: f64 = 2.0;
pub const DEFAULT_SEED: u64 = 1000;
pub const DEFAULT_MAX_POINTS: usize = 1_000_000;
/// Longitude span of the spherical domain in degrees.
pub const SPHERE_WIDTH: f64 = 360.0;
/// Latitude span of the spherical domain in degrees.
pub const SPHERE_HEIGHT: f64 = 180.0;

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoConfig {
    /// Width of the planar domain, centered on the origin.
    pub width: f64,
    /// Height of the planar domain, centered on the origin.
    pub height: f64,
    /// Minimum separation between sampled points.
    pub radius: f64,
    /// Seed for [`GeoConfig::rng`].
    pub seed: u64,
    /// Upper bound on documents inserted by one population step.
    pub max_points: usize,
    /// Longitude span used by spherical populations and shapes.
    pub sphere_width: f64,
    /// Latitude span used by spherical populations and shapes.
    pub sphere_height: f64,
    /// Cap on rejection-sampling attempts for the fallible shape generators.
    /// `None` retries until a shape fits.
    pub max_attempts: Option<u32>,
    /// Whether hexagons are kept inside the bounding domain.
    pub hexagon_placement: HexagonPlacement,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            radius: DEFAULT_RADIUS,
            seed: DEFAULT_SEED,
            max_points: DEFAULT_MAX_POINTS,
            sphere_width: SPHERE_WIDTH,
            sphere_height: SPHERE_HEIGHT,
            max_attempts: None,
            hexagon_placement: HexagonPlacement::default(),
        }
    }
}

impl GeoConfig {
    /// Creates a configuration for a `width` x `height` domain and separation `radius`.
    pub fn new(width: f64, height: f64, radius: f64) -> Self {
        Self {
            width,
            height,
            radius,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    /// Sets the longitude/latitude spans of the spherical domain.
    pub fn with_sphere_extent(mut self, width: f64, height: f64) -> Self {
        self.sphere_width = width;
        self.sphere_height = height;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_hexagon_placement(mut self, placement: HexagonPlacement) -> Self {
        self.hexagon_placement = placement;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(Error::InvalidConfig(
                "width and height must be finite and > 0".into(),
            ));
        }
        if !positive(self.radius) {
            return Err(Error::InvalidConfig(
                "radius must be finite and > 0".into(),
            ));
        }
        if !positive(self.sphere_width) || !positive(self.sphere_height) {
            return Err(Error::InvalidConfig(
                "sphere extent must be finite and > 0".into(),
            ));
        }
        if self.max_points == 0 {
            return Err(Error::InvalidConfig("max_points must be > 0".into()));
        }
        if self.max_attempts == Some(0) {
            return Err(Error::InvalidConfig("max_attempts must be > 0".into()));
        }
        Ok(())
    }

    /// Planar domain size.
    pub fn extent(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Spherical domain size in degrees.
    pub fn sphere_extent(&self) -> DVec2 {
        DVec2::new(self.sphere_width, self.sphere_height)
    }

    pub fn x_min(&self) -> f64 {
        -(self.width / 2.0)
    }

    pub fn x_max(&self) -> f64 {
        self.width / 2.0
    }

    pub fn y_min(&self) -> f64 {
        -(self.height / 2.0)
    }

    pub fn y_max(&self) -> f64 {
        self.height / 2.0
    }

    /// Area expected to hold `points` samples at this configuration's density.
    pub fn enclosing_area(&self, points: usize) -> f64 {
        enclosing_area(points, self.radius)
    }

    /// A fresh generator seeded with [`GeoConfig::seed`].
    pub fn rng(&self) -> SeededRng {
        SeededRng::new(self.seed)
    }
}
