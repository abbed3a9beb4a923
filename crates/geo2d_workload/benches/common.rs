use std::time::Duration;

use criterion::{Criterion, Throughput};
use geo2d_workload::config::GeoConfig;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(3);

/// Seed the fixtures are generated with.
pub const FIXTURE_SEED: u64 = 1000;

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn fixture_config() -> GeoConfig {
    GeoConfig::default().with_seed(FIXTURE_SEED)
}

pub fn items(count: usize) -> Throughput {
    Throughput::Elements(count.max(1) as u64)
}
