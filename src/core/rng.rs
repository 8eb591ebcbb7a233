//! Deterministic random number generation for setup.
//!
//! The engine itself never draws randomness: the deck is shuffled once at
//! setup and afterwards only a cursor moves. That shuffle is driven by an
//! explicit seed so games can be reproduced exactly.
//!
//! ## Context streams
//!
//! The opening and remainder pools are shuffled independently. Each gets its
//! own stream derived from the seed and a context name, so changing the size
//! of one pool never perturbs the order of the other.
//!
//! ```
//! use tng_engine::core::GameRng;
//!
//! let rng = GameRng::new(42);
//! let mut a = rng.for_context("opening");
//! let mut b = GameRng::new(42).for_context("opening");
//!
//! let mut x = vec![1, 2, 3, 4, 5, 6];
//! let mut y = x.clone();
//! a.shuffle(&mut x);
//! b.shuffle(&mut y);
//! assert_eq!(x, y);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Golden-ratio multiplier spreading the seed across the stream space.
const STREAM_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

// FNV-1a, 64 bit.
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Deterministic RNG with context-derived streams.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed,
    /// on every platform and toolchain.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let tag = context
            .bytes()
            .fold(FNV_OFFSET, |h, b| (h ^ u64::from(b)).wrapping_mul(FNV_PRIME));
        let context_seed = self.seed.wrapping_mul(STREAM_MIX) ^ tag;

        Self {
            inner: ChaCha8Rng::seed_from_u64(context_seed),
            seed: context_seed,
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shuffled(rng: &mut GameRng) -> Vec<u32> {
        let mut data: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut data);
        data
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        assert_eq!(shuffled(&mut rng1), shuffled(&mut rng2));
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        assert_ne!(shuffled(&mut rng1), shuffled(&mut rng2));
    }

    #[test]
    fn test_context_produces_different_sequence() {
        let rng = GameRng::new(42);
        let mut ctx1 = rng.for_context("opening");
        let mut ctx2 = rng.for_context("remainder");

        assert_ne!(shuffled(&mut ctx1), shuffled(&mut ctx2));
    }

    #[test]
    fn test_context_ignores_parent_progress() {
        let mut rng = GameRng::new(7);
        let before = rng.for_context("opening");
        let _ = shuffled(&mut rng);
        let after = rng.for_context("opening");

        assert_eq!(before.seed(), after.seed());
    }

    /// Test that stream seeds are pinned, so recorded games keep replaying.
    #[test]
    fn test_context_seeds_are_stable() {
        assert_eq!(GameRng::new(42).for_context("opening").seed(), 0x0c1d_5ea1_2f81_7865);
        assert_eq!(GameRng::new(0).for_context("remainder").seed(), 0x5fba_cc19_5df8_1b58);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data = shuffled(&mut rng);

        data.sort_unstable();
        assert_eq!(data, (0..20).collect::<Vec<_>>());
    }
}
