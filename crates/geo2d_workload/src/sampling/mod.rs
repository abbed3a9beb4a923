//! Point sampling over a rectangular domain.
//!
//! [`PoissonDiscSampler`] is the incremental generator behind every populated
//! collection: callers pull one point at a time and may interleave their own
//! draws from the same [`RandomSource`]. [`PositionSampling`] wraps it for
//! callers that only want the finished point set.
use glam::DVec2;
use mint::Vector2;

use crate::random::RandomSource;

pub mod poisson_disc;

pub use poisson_disc::{PoissonDiscSampler, PoissonDiscSampling, Samples};

/// Outcome of asking an incremental sampler for its next point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    /// A newly accepted point in sampler-local coordinates.
    Point(DVec2),
    /// No active samples remain; the sequence is finished.
    Exhausted,
}

impl Sample {
    pub fn point(self) -> Option<DVec2> {
        match self {
            Sample::Point(p) => Some(p),
            Sample::Exhausted => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Sample::Exhausted)
    }
}

/// Trait for batch position sampling over `[0, extent.x) x [0, extent.y)`.
pub trait PositionSampling: Send + Sync {
    fn generate(
        &self,
        domain_extent: Vector2<f64>,
        rng: &mut dyn RandomSource,
    ) -> Vec<Vector2<f64>>;
}
