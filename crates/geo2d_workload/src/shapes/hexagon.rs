//! Regular hexagons, emitted as `$polygon` vertex lists.
use std::f64::consts::PI;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::GeoConfig;
use crate::error::Result;
use crate::random::RandomSource;
use crate::shapes::{place_capped, place_unbounded, planar_position, ShapeKind};

/// How hexagon placement treats the bounding domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HexagonPlacement {
    /// One center draw, accepted even if vertices leave the domain.
    /// Keeps the draw stream identical to existing fixtures.
    #[default]
    Unchecked,
    /// Redraw the center until all six vertices are inside the domain.
    Contained,
}

/// A regular hexagon with two vertical edges, vertices in polygon order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegularHexagon {
    pub vertices: [DVec2; 6],
}

impl RegularHexagon {
    /// Hexagon centered on `center` with circumradius `side`.
    pub fn new(center: DVec2, side: f64) -> Self {
        let half_width = (60.0 * PI / 180.0).sin() * side;
        let half_side = side * 0.5;
        let offsets = [
            DVec2::new(-half_width, half_side),
            DVec2::new(-half_width, half_side - side),
            DVec2::new(0.0, -side),
            DVec2::new(half_width, half_side - side),
            DVec2::new(half_width, half_side),
            DVec2::new(0.0, side),
        ];
        Self {
            vertices: offsets.map(|offset| offset + center),
        }
    }

    /// Point halfway between the left-upper and right-lower vertices.
    pub fn midpoint(&self) -> DVec2 {
        let a = self.vertices[0];
        let b = self.vertices[3];
        b - (b - a) / 2.0
    }

    /// Point-in-polygon test; the hexagon is convex and wound counter-clockwise.
    pub fn contains(&self, point: DVec2) -> bool {
        (0..6).all(|i| {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % 6];
            (b - a).perp_dot(point - a) >= 0.0
        })
    }

    pub fn is_within(&self, config: &GeoConfig) -> bool {
        self.vertices.iter().all(|v| {
            v.x <= config.x_max() && v.x >= config.x_min() && v.y <= config.y_max() && v.y >= config.y_min()
        })
    }
}

/// Side length of a regular hexagon with the given area: `area = 3√3/2 · side²`.
pub fn hexagon_side(area: f64) -> f64 {
    ((2.0 * area) / (3.0 * 3f64.sqrt())).sqrt()
}

/// A hexagon enclosing roughly `points` samples, placed per
/// [`GeoConfig::hexagon_placement`].
pub fn random_hexagon<R: RandomSource + ?Sized>(
    config: &GeoConfig,
    points: usize,
    rng: &mut R,
) -> RegularHexagon {
    let side = hexagon_side(config.enclosing_area(points));
    match config.hexagon_placement {
        HexagonPlacement::Unchecked => RegularHexagon::new(planar_position(config, rng), side),
        HexagonPlacement::Contained => place_unbounded(|| draw_contained(config, side, rng)),
    }
}

/// Like [`random_hexagon`]; contained placement gives up after
/// [`GeoConfig::max_attempts`] draws.
pub fn try_random_hexagon<R: RandomSource + ?Sized>(
    config: &GeoConfig,
    points: usize,
    rng: &mut R,
) -> Result<RegularHexagon> {
    let side = hexagon_side(config.enclosing_area(points));
    match config.hexagon_placement {
        HexagonPlacement::Unchecked => Ok(RegularHexagon::new(planar_position(config, rng), side)),
        HexagonPlacement::Contained => place_capped(ShapeKind::Hexagon, config.max_attempts, || {
            draw_contained(config, side, rng)
        }),
    }
}

fn draw_contained<R: RandomSource + ?Sized>(
    config: &GeoConfig,
    side: f64,
    rng: &mut R,
) -> Option<RegularHexagon> {
    let candidate = RegularHexagon::new(planar_position(config, rng), side);
    candidate.is_within(config).then_some(candidate)
}
