//! Randomness seam for the probabilistic parts of the pipeline.
//!
//! The duplicate-input strip and the tie-break selection both roll dice.
//! Production code uses [`ThreadRngSampler`]; tests pin the outcome with
//! [`FixedSampler`] so both branches can be exercised deterministically.

use rand::Rng;
use std::fmt::Debug;

/// Source of randomized decisions.
pub trait Sampler: Send + Sync + Debug {
    /// Weighted coin flip: true roughly `percent` times out of 100.
    fn odds_of(&self, percent: u8) -> bool;

    /// Picks an index uniformly from `0..len`. `len` must be non-zero.
    fn choose(&self, len: usize) -> usize;
}

/// Samples from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSampler;

impl Sampler for ThreadRngSampler {
    fn odds_of(&self, percent: u8) -> bool {
        rand::thread_rng().gen_range(0_u32..100) < u32::from(percent)
    }

    fn choose(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Returns fixed outcomes; for tests only.
#[derive(Debug, Clone, Copy)]
pub struct FixedSampler {
    /// Outcome of every coin flip.
    pub flip: bool,
    /// Index returned by every choice, clamped to the valid range.
    pub index: usize,
}

impl Sampler for FixedSampler {
    fn odds_of(&self, _percent: u8) -> bool {
        self.flip
    }

    fn choose(&self, len: usize) -> usize {
        self.index.min(len.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_odds_never_hit() {
        let sampler = ThreadRngSampler;
        assert!((0..100).all(|_| !sampler.odds_of(0)));
    }

    #[test]
    fn test_full_odds_always_hit() {
        let sampler = ThreadRngSampler;
        assert!((0..100).all(|_| sampler.odds_of(100)));
    }

    #[test]
    fn test_choose_stays_in_range() {
        let sampler = ThreadRngSampler;
        assert!((0..100).all(|_| sampler.choose(3) < 3));
    }

    #[test]
    fn test_fixed_sampler_clamps_index() {
        let sampler = FixedSampler {
            flip: true,
            index: 10,
        };
        assert_eq!(sampler.choose(3), 2);
    }
}
