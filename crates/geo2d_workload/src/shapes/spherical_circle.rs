//! Circles on the longitude/latitude domain, for `$centerSphere` queries.
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::GeoConfig;
use crate::random::RandomSource;
use crate::shapes::lon_lat_position;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphericalCircle {
    /// `(longitude, latitude)` in degrees.
    pub center: DVec2,
    pub radius: f64,
}

impl SphericalCircle {
    pub fn longitude(&self) -> f64 {
        self.center.x
    }

    pub fn latitude(&self) -> f64 {
        self.center.y
    }

    /// Great-circle angle in radians between the center and `(lon, lat)`.
    pub fn angular_distance(&self, lon_lat: DVec2) -> f64 {
        let (lat1, lat2) = (self.latitude().to_radians(), lon_lat.y.to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (lon_lat.x - self.longitude()).to_radians();
        let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * h.sqrt().min(1.0).asin()
    }

    /// `radius` is read in radians, as `$centerSphere` does.
    pub fn contains(&self, lon_lat: DVec2) -> bool {
        self.angular_distance(lon_lat) <= self.radius
    }
}

/// A spherical circle for roughly `points` samples.
///
/// The radius is the enclosing area divided by the planar width, which only
/// approximates the intended coverage for the default domain. Placement is
/// never rejected.
pub fn random_spherical_circle<R: RandomSource + ?Sized>(
    config: &GeoConfig,
    points: usize,
    rng: &mut R,
) -> SphericalCircle {
    SphericalCircle {
        center: lon_lat_position(config, rng),
        radius: config.enclosing_area(points) / config.width,
    }
}
