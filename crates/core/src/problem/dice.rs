//! Random draws used by problem generation.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

/// Source of uniform integer draws.
pub trait Dice {
    /// Uniform draw from `low..=high`.
    fn roll(&mut self, low: i32, high: i32) -> i32;

    /// True with probability `percent / 100`.
    fn chance(&mut self, percent: u8) -> bool {
        percent > 0 && self.roll(0, 99) < i32::from(percent)
    }
}

impl Dice for ChaCha8Rng {
    fn roll(&mut self, low: i32, high: i32) -> i32 {
        debug_assert!(low <= high);
        let width = (i64::from(high) - i64::from(low) + 1) as u64;
        let offset = self.next_u64() % width;
        (i64::from(low) + offset as i64) as i32
    }
}

/// Splits one run seed into independent streams.
pub fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;

    #[test]
    fn roll_stays_inside_requested_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(12_345);
        for _ in 0..1_000 {
            let value = rng.roll(-10, 10);
            assert!((-10..=10).contains(&value));
        }
    }

    #[test]
    fn roll_reaches_both_ends_of_a_small_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let draws: Vec<i32> = (0..200).map(|_| rng.roll(0, 1)).collect();
        assert!(draws.contains(&0));
        assert!(draws.contains(&1));
    }

    #[test]
    fn chance_honours_the_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        assert!((0..100).all(|_| !rng.chance(0)));
        assert!((0..100).all(|_| rng.chance(100)));
    }

    #[test]
    fn stream_seeds_differ_per_stream() {
        assert_ne!(mix_seed_stream(1, 0), mix_seed_stream(1, 1));
        assert_ne!(mix_seed_stream(1, 0), mix_seed_stream(2, 0));
        assert_eq!(mix_seed_stream(5, 3), mix_seed_stream(5, 3));
    }
}
