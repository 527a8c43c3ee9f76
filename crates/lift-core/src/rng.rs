//! Injected randomness.
//!
//! The simulation never reaches for a global RNG.  Everything random
//! (destination choice, schedule jitter) goes through a [`RandomSource`]
//! handed in by the caller, so tests can substitute a deterministic source
//! and production runs stay reproducible from a single seed.
//!
//! # Seed derivation
//!
//! Child generators for independent runs are seeded by
//!
//!   seed = parent.next_u64() XOR (offset * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive offsets uniformly across the seed space.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── RandomSource ──────────────────────────────────────────────────────────────

/// The random operations the simulation needs.
pub trait RandomSource {
    /// Uniform index in `0..len`.  `len` is always non-zero.
    fn index_below(&mut self, len: usize) -> usize;

    /// Uniform integer in `lo..hi`.  Returns `lo` when the range is empty.
    fn int_between(&mut self, lo: i64, hi: i64) -> i64;

    /// Choose a uniformly random element, `None` for an empty slice.
    #[inline]
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        Some(&items[self.index_below(items.len())])
    }
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    #[inline]
    fn index_below(&mut self, len: usize) -> usize {
        (**self).index_below(len)
    }

    #[inline]
    fn int_between(&mut self, lo: i64, hi: i64) -> i64 {
        (**self).int_between(lo, hi)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Seeded `SmallRng` used for production runs.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset, one per
    /// independent run or per resident schedule expansion.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}

impl RandomSource for SimRng {
    #[inline]
    fn index_below(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }

    #[inline]
    fn int_between(&mut self, lo: i64, hi: i64) -> i64 {
        if lo >= hi {
            return lo;
        }
        self.0.gen_range(lo..hi)
    }
}

// ── FirstChoice ───────────────────────────────────────────────────────────────

/// A deterministic source: always the first element, always the lower bound.
///
/// Handy in tests where the outcome must not depend on a seed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstChoice;

impl RandomSource for FirstChoice {
    #[inline]
    fn index_below(&mut self, _len: usize) -> usize {
        0
    }

    #[inline]
    fn int_between(&mut self, lo: i64, _hi: i64) -> i64 {
        lo
    }
}
