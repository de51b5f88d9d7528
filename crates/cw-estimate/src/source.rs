//! Baseline crowd draws.

use std::ops::RangeInclusive;

use cw_core::SimRng;

use crate::{EstimateError, EstimateResult};

/// Supplies the random baseline crowd size for one route evaluation.
///
/// Each call to [`Estimator::estimate_crowd`][crate::Estimator::estimate_crowd]
/// consumes exactly one draw.
pub trait BaselineSource {
    /// Return a baseline in `range` (both ends inclusive).
    fn draw_baseline(&mut self, range: RangeInclusive<u32>) -> u32;
}

impl BaselineSource for SimRng {
    #[inline]
    fn draw_baseline(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.gen_range(range)
    }
}

impl<S: BaselineSource + ?Sized> BaselineSource for &mut S {
    #[inline]
    fn draw_baseline(&mut self, range: RangeInclusive<u32>) -> u32 {
        (**self).draw_baseline(range)
    }
}

// ── FixedBaselines ────────────────────────────────────────────────────────────

/// Deterministic [`BaselineSource`] that replays a fixed sequence.
///
/// The sequence repeats once exhausted.  The requested range is ignored, so
/// values outside `[1000, 4000]` are returned as given.
///
/// ```rust
/// use cw_estimate::{BaselineSource, FixedBaselines};
///
/// let mut src = FixedBaselines::new(vec![2_000, 3_000]);
/// assert_eq!(src.draw_baseline(1_000..=4_000), 2_000);
/// assert_eq!(src.draw_baseline(1_000..=4_000), 3_000);
/// assert_eq!(src.draw_baseline(1_000..=4_000), 2_000);
/// assert_eq!(src.draws(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct FixedBaselines {
    values: Vec<u32>,
    draws:  usize,
}

impl FixedBaselines {
    /// # Panics
    /// Panics if `values` is empty.
    pub fn new(values: Vec<u32>) -> Self {
        assert!(!values.is_empty(), "FixedBaselines needs at least one value");
        Self { values, draws: 0 }
    }

    /// Always returns `value`.
    pub fn constant(value: u32) -> Self {
        Self::new(vec![value])
    }

    /// Always returns `value`, which must lie inside `range`.
    ///
    /// # Errors
    /// [`EstimateError::Config`] if `value` is outside `range`.
    pub fn pinned(value: u32, range: RangeInclusive<u32>) -> EstimateResult<Self> {
        if !range.contains(&value) {
            return Err(EstimateError::Config(format!(
                "baseline {value} is outside {}..={}",
                range.start(),
                range.end()
            )));
        }
        Ok(Self::constant(value))
    }

    /// Number of baselines drawn so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl BaselineSource for FixedBaselines {
    fn draw_baseline(&mut self, _range: RangeInclusive<u32>) -> u32 {
        let v = self.values[self.draws % self.values.len()];
        self.draws += 1;
        v
    }
}
