//! Seeded random sources.
//!
//! [`SeededRng`] is the small linear congruential generator every workload
//! fixture is derived from: a fixed seed always yields the same stream, so
//! generated points, shapes and operation lists are identical across runs.
//!
//! The sampler and shape generators only depend on the [`RandomSource`] trait.
//! Any [`rand::RngCore`] can stand in through [`RngCoreSource`] when fixture
//! compatibility does not matter.
use rand::RngCore;

const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49297;
const MODULUS: u64 = 233_280;

/// Scale applied by [`RandomSource::random`].
pub const RANDOM_SCALE: f64 = 1e16;

/// A stream of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// Advance the stream and return the next draw in `[0, 1)`.
    fn next_number(&mut self) -> f64;

    /// Scale the next draw by `max`.
    ///
    /// Non-positive `max` returns the unscaled draw.
    #[inline]
    fn next_int(&mut self, max: f64) -> f64 {
        if max > 0.0 {
            self.next_number() * max
        } else {
            self.next_number()
        }
    }

    /// [`RandomSource::next_int`] with the largest finite `f64` as bound.
    #[inline]
    fn next_int_unbounded(&mut self) -> f64 {
        self.next_int(f64::MAX)
    }

    /// Uniform draw in `[0, 1)` routed through [`RandomSource::next_int`].
    ///
    /// Consumes exactly one step of the stream, like every other draw.
    #[inline]
    fn random(&mut self) -> f64 {
        self.next_int(RANDOM_SCALE) / RANDOM_SCALE
    }
}

/// Linear congruential generator: `seed' = (seed * 9301 + 49297) mod 233280`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Current state; the constructor seed until the first draw.
    pub fn seed(&self) -> u64 {
        self.state
    }
}

impl RandomSource for SeededRng {
    #[inline]
    fn next_number(&mut self) -> f64 {
        // Reducing first keeps large seeds from overflowing without changing the result.
        self.state = ((self.state % MODULUS) * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }
}

/// Adapts any [`RngCore`] into a [`RandomSource`] using 53 bits per draw.
#[derive(Debug, Clone)]
pub struct RngCoreSource<R> {
    rng: R,
}

impl<R: RngCore> RngCoreSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore> RandomSource for RngCoreSource<R> {
    #[inline]
    fn next_number(&mut self) -> f64 {
        (self.rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    struct FixedRng {
        value: u64,
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.value as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.value
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 8];
            }
        }
    }

    #[test]
    fn seeded_stream_matches_golden_values() {
        let mut rng = SeededRng::new(1000);
        let expected = [19097u64, 144414, 17671, 178148, 16005, 79162];
        for state in expected {
            let value = rng.next_number();
            assert_eq!(rng.seed(), state);
            assert_eq!(value, state as f64 / 233280.0);
        }
    }

    #[test]
    fn seed_reports_constructor_value_before_first_draw() {
        let rng = SeededRng::new(42);
        assert_eq!(rng.seed(), 42);
    }

    #[test]
    fn large_seeds_reduce_to_the_same_stream() {
        let mut small = SeededRng::new(1000);
        let mut large = SeededRng::new(1000 + 233_280 * 17);
        for _ in 0..32 {
            assert_eq!(small.next_number(), large.next_number());
        }
    }

    #[test]
    fn next_int_scales_positive_bounds_only() {
        let mut a = SeededRng::new(7);
        let mut b = SeededRng::new(7);
        assert_eq!(a.next_int(100.0), b.next_number() * 100.0);
        assert_eq!(a.next_int(0.0), b.next_number());
        assert_eq!(a.next_int(-5.0), b.next_number());
        assert_eq!(a.next_int_unbounded(), b.next_number() * f64::MAX);
    }

    #[test]
    fn random_consumes_one_step_and_stays_in_unit_range() {
        let mut a = SeededRng::new(1000);
        let mut b = SeededRng::new(1000);
        for _ in 0..1000 {
            let r = a.random();
            assert!((0.0..1.0).contains(&r));
            assert_eq!(r, b.next_int(RANDOM_SCALE) / RANDOM_SCALE);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn rng_core_source_maps_extremes_into_unit_range() {
        let mut low = RngCoreSource::new(FixedRng { value: 0 });
        assert_eq!(low.next_number(), 0.0);

        let mut high = RngCoreSource::new(FixedRng { value: u64::MAX });
        let top = high.next_number();
        assert!(top < 1.0);
        assert!(1.0 - top < 1e-15);
    }

    #[test]
    fn rng_core_source_is_deterministic_for_same_seed() {
        let mut a = RngCoreSource::new(StdRng::seed_from_u64(123));
        let mut b = RngCoreSource::new(StdRng::seed_from_u64(123));
        for _ in 0..64 {
            let v = a.random();
            assert!((0.0..1.0).contains(&v));
            assert_eq!(v, b.random());
        }
    }
}
