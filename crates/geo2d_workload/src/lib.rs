#![forbid(unsafe_code)]
//! geo2d_workload: deterministic point sets, enclosing shapes and benchmark
//! workloads for 2D geospatial indexes.
//!
//! Modules:
//! - random: the seeded LCG and the [`random::RandomSource`] seam
//! - sampling: incremental Bridson Poisson-disc sampling
//! - shapes: boxes, circles, hexagons and spherical circles sized by point count
//! - workload: test descriptors, setup steps and the bundled suites
//!
//! The same seed always yields the same points, shapes and operation lists.
pub mod config;
pub mod error;
pub mod random;
pub mod sampling;
pub mod shapes;
pub mod workload;

/// Convenient re-exports for common types. Import with `use geo2d_workload::prelude::*;`.
pub mod prelude {
    pub use crate::config::GeoConfig;
    pub use crate::error::{Error, Result};
    pub use crate::random::{RandomSource, RngCoreSource, SeededRng};
    pub use crate::sampling::{PoissonDiscSampler, PoissonDiscSampling, PositionSampling, Sample};
    pub use crate::shapes::{
        enclosing_area, random_box, random_circle, random_hexagon, random_spherical_circle,
        try_random_box, try_random_circle, try_random_hexagon, Circle, GeoBox, HexagonPlacement,
        RegularHexagon, Shape, ShapeKind, SphericalCircle,
    };
    pub use crate::workload::geo2d::geo2d_index_workload;
    pub use crate::workload::mms::mms_update_workload;
    pub use crate::workload::{
        Collection, CollectionCall, Env, Op, PlaceType, Population, RecordingCollection,
        SetupStep, TestCase, Workload,
    };
}
