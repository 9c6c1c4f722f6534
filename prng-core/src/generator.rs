//! Uniform sources producing floats in `[0, 1)`.

use alloc::vec::Vec;

#[cfg(feature = "std")]
use rand::{distributions::Uniform, rngs::StdRng, Rng, SeedableRng};

/// Anything that can draw uniformly distributed floats from `[0, 1)`
pub trait UniformGenerator {
    /// Draw a single value
    fn next_uniform(&mut self) -> f64;

    /// Draw `n` values in order. Repeated calls continue the same stream.
    fn generate(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.next_uniform()).collect()
    }
}

impl<G: UniformGenerator + ?Sized> UniformGenerator for alloc::boxed::Box<G> {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

/// Multiplicative congruential generator with modulus 2^31.
///
/// The product is taken with 32-bit signed wraparound and negative results
/// are folded back by adding 2^31, so sequences match the classic
/// `seed * 5^13` generator bit for bit.
#[derive(Debug, Clone)]
pub struct LcgGenerator {
    state: i32,
}

impl LcgGenerator {
    pub const MULTIPLIER: i32 = 1_220_703_125;
    pub const FOLD: i64 = 2 * 1_073_741_824;
    pub const SCALE: f64 = 0.000_000_000_465_661_3;

    /// Seeds whose low 30 bits are all zero (0, 2^30, i32::MIN, -2^30)
    /// collapse to a constant stream and are replaced by 1.
    pub fn new(seed: i32) -> Self {
        Self {
            state: if seed & 0x3FFF_FFFF == 0 { 1 } else { seed },
        }
    }

    pub fn state(&self) -> i32 {
        self.state
    }

    /// Advance the recurrence and return the new state, always in `[0, 2^31)`
    pub fn next_state(&mut self) -> i32 {
        let mut y = self.state.wrapping_mul(Self::MULTIPLIER);
        if y < 0 {
            y = (y as i64 + Self::FOLD) as i32;
        }
        self.state = y;
        y
    }
}

impl UniformGenerator for LcgGenerator {
    fn next_uniform(&mut self) -> f64 {
        self.next_state() as f64 * Self::SCALE
    }
}

/// Baseline generator: `StdRng` feeding a uniform real distribution
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct LibraryGenerator {
    rng: StdRng,
    distribution: Uniform<f64>,
}

#[cfg(feature = "std")]
impl LibraryGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            distribution: Uniform::new(0.0, 1.0),
        }
    }
}

#[cfg(feature = "std")]
impl UniformGenerator for LibraryGenerator {
    fn next_uniform(&mut self) -> f64 {
        self.rng.sample(self.distribution)
    }
}

/// Seconds since the Unix epoch, or zero if the clock is set before it
#[cfg(feature = "std")]
pub fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_lcg_known_states() {
        let mut lcg = LcgGenerator::new(1);
        let states: Vec<i32> = (0..4).map(|_| lcg.next_state()).collect();
        assert_eq!(states, vec![1_220_703_125, 839_070_905, 146_721_453, 187_805_105]);
        assert_eq!(lcg.state(), 187_805_105);
    }

    #[test]
    fn test_lcg_known_values() {
        let mut lcg = LcgGenerator::new(1);
        let values = lcg.generate(2);
        assert_eq!(values[0], 1_220_703_125.0 * 0.000_000_000_465_661_3);
        assert_eq!(values[1], 839_070_905.0 * 0.000_000_000_465_661_3);
        assert!(libm::fabs(values[0] - 0.568_434_204_101_562_5) < 1e-15);
    }

    #[test]
    fn test_lcg_repeatability() {
        let mut lcg1 = LcgGenerator::new(12345);
        let mut lcg2 = LcgGenerator::new(12345);
        assert_eq!(lcg1.generate(500), lcg2.generate(500));
    }

    #[test]
    fn test_lcg_state_persists_across_calls() {
        let mut whole = LcgGenerator::new(777);
        let mut split = LcgGenerator::new(777);

        let expected = whole.generate(20);
        let mut actual = split.generate(7);
        actual.extend(split.generate(13));

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_lcg_negative_seed_folds_into_range() {
        let mut lcg = LcgGenerator::new(-987_654_321);
        for _ in 0..1000 {
            assert!(lcg.next_state() >= 0);
        }
    }

    #[test]
    fn test_lcg_zero_seed_is_replaced() {
        let mut lcg = LcgGenerator::new(0);
        assert_eq!(lcg.state(), 1);
        assert!(lcg.generate(10).iter().any(|&v| v > 0.0));
    }

    #[test]
    fn test_lcg_min_seed_is_replaced() {
        let mut lcg = LcgGenerator::new(i32::MIN);
        assert_eq!(lcg.state(), 1);
        assert_eq!(lcg.generate(10), LcgGenerator::new(1).generate(10));
    }

    #[test]
    fn test_lcg_constant_stream_seeds_are_replaced() {
        for seed in [1 << 30, -(1 << 30)] {
            let mut lcg = LcgGenerator::new(seed);
            assert_eq!(lcg.state(), 1, "seed {seed}");
            let values = lcg.generate(10);
            assert!(values.windows(2).any(|pair| pair[0] != pair[1]));
        }
    }

    #[test]
    fn test_lcg_nearby_seeds_are_kept() {
        assert_eq!(LcgGenerator::new(i32::MIN + 1).state(), i32::MIN + 1);
        assert_eq!(LcgGenerator::new(1 << 29).state(), 1 << 29);
    }

    #[test]
    fn test_lcg_range() {
        let mut lcg = LcgGenerator::new(i32::MAX);
        let values = lcg.generate(10_000);
        assert_eq!(values.len(), 10_000);
        assert!(values.iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_largest_lcg_draw_stays_below_one() {
        assert!((i32::MAX as f64) * LcgGenerator::SCALE < 1.0);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_library_range_and_length() {
        let mut generator = LibraryGenerator::new(42);
        let values = generator.generate(10_000);
        assert_eq!(values.len(), 10_000);
        assert!(values.iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_library_repeatability() {
        let mut first = LibraryGenerator::new(2024);
        let mut second = LibraryGenerator::new(2024);
        assert_eq!(first.generate(100), second.generate(100));
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_generate_zero_is_empty() {
        assert!(LcgGenerator::new(5).generate(0).is_empty());
        assert!(LibraryGenerator::new(5).generate(0).is_empty());
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_boxed_generators_are_interchangeable() {
        let mut generators: Vec<Box<dyn UniformGenerator>> = vec![
            Box::new(LcgGenerator::new(3)),
            Box::new(LibraryGenerator::new(3)),
        ];
        for generator in generators.iter_mut() {
            assert_eq!(generator.generate(25).len(), 25);
        }
    }
}
