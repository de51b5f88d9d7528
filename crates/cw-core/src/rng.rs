//! Process-wide randomness source.
//!
//! # Determinism strategy
//!
//! The monitor runs on a single execution context, so one `SimRng` is
//! created at start-up and passed by `&mut` to every consumer.  Nothing
//! reaches for a thread-local or global generator, which means:
//!
//! - A run started with `SimRng::new(seed)` replays exactly.
//! - Tests can swap the whole source for a fixed-sequence double at the
//!   seam where it is consumed (see `cw_estimate::BaselineSource`).
//!
//! Production runs without `--seed` use `SimRng::from_entropy`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{Hour, HourWindow};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded generator behind baseline draws and random hour selection.
///
/// The monitor splits one seeded root into independent streams with
/// [`SimRng::child`] so hour selection never shifts the baseline sequence.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy.  Runs are not reproducible.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Draw an hour uniformly from `window` (both ends inclusive).
    pub fn hour_in(&mut self, window: HourWindow) -> Hour {
        let h: u32 = self.0.gen_range(window.first().get()..=window.last().get());
        Hour::new(h).unwrap_or(window.first())
    }
}
