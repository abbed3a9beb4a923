//! Axis-aligned boxes with a randomised aspect ratio.
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::GeoConfig;
use crate::error::Result;
use crate::random::RandomSource;
use crate::shapes::{place_capped, place_unbounded, planar_position, ShapeKind};

/// Axis-aligned box given by opposite corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBox {
    pub bottom_left: DVec2,
    pub upper_right: DVec2,
}

impl GeoBox {
    pub fn size(&self) -> DVec2 {
        self.upper_right - self.bottom_left
    }

    pub fn area(&self) -> f64 {
        let size = self.size();
        size.x * size.y
    }

    /// Halfway point, computed back from the upper-right corner.
    pub fn midpoint(&self) -> DVec2 {
        self.upper_right - (self.upper_right - self.bottom_left) / 2.0
    }

    /// Inclusive on all edges.
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.bottom_left.x
            && point.x <= self.upper_right.x
            && point.y >= self.bottom_left.y
            && point.y <= self.upper_right.y
    }

    pub fn is_within(&self, config: &GeoConfig) -> bool {
        self.upper_right.x <= config.x_max()
            && self.upper_right.y <= config.y_max()
            && self.bottom_left.x >= config.x_min()
            && self.bottom_left.y >= config.y_min()
    }
}

/// A box enclosing roughly `points` samples, retried until it fits the domain.
///
/// Never returns if no placement can fit; see [`try_random_box`].
pub fn random_box<R: RandomSource + ?Sized>(
    config: &GeoConfig,
    points: usize,
    rng: &mut R,
) -> GeoBox {
    let area = config.enclosing_area(points);
    place_unbounded(|| draw_box(config, area, rng))
}

/// Like [`random_box`], giving up after [`GeoConfig::max_attempts`] draws.
pub fn try_random_box<R: RandomSource + ?Sized>(
    config: &GeoConfig,
    points: usize,
    rng: &mut R,
) -> Result<GeoBox> {
    let area = config.enclosing_area(points);
    place_capped(ShapeKind::Box, config.max_attempts, || {
        draw_box(config, area, rng)
    })
}

/// One placement attempt: corner first, then a width in `[0, 2 sqrt(area))`
/// with the height backed out so the area is preserved.
fn draw_box<R: RandomSource + ?Sized>(config: &GeoConfig, area: f64, rng: &mut R) -> Option<GeoBox> {
    let bottom_left = planar_position(config, rng);
    let width = rng.next_int(area.sqrt() * 2.0);
    let candidate = GeoBox {
        bottom_left,
        upper_right: DVec2::new(bottom_left.x + width, bottom_left.y + area / width),
    };
    candidate.is_within(config).then_some(candidate)
}
