//! Congestion tiers and load classification.

use std::fmt;

use crate::{EstimateError, EstimateResult};

/// Load at or above which a route is at least [`Tier::Medium`].
pub const MEDIUM_FLOOR: f64 = 0.5;

/// Load at or above which a route is [`Tier::High`].
pub const HIGH_FLOOR: f64 = 0.8;

// ── Tier ──────────────────────────────────────────────────────────────────────

/// Discrete congestion level.  Ordered `Low < Medium < High`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    /// Map a load ratio to its tier.
    ///
    /// Each floor belongs to the higher tier: `0.5` is `Medium`, `0.8` is
    /// `High`.  NaN compares false everywhere and lands in `High`.
    #[inline]
    pub fn from_load(load: f64) -> Tier {
        if load < MEDIUM_FLOOR {
            Tier::Low
        } else if load < HIGH_FLOOR {
            Tier::Medium
        } else {
            Tier::High
        }
    }

    /// Status text shown next to the tier.
    pub fn label(self) -> &'static str {
        match self {
            Tier::Low    => "Safe",
            Tier::Medium => "Caution",
            Tier::High   => "Congested",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Low    => "Low",
            Tier::Medium => "Medium",
            Tier::High   => "High",
        };
        f.write_str(name)
    }
}

// ── CongestionResult ──────────────────────────────────────────────────────────

/// Load ratio for one route and the tier it falls into.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CongestionResult {
    /// `crowd_count / capacity`.  May exceed 1.0.
    pub load_ratio: f64,
    pub tier:       Tier,
}

impl CongestionResult {
    #[inline]
    pub fn label(&self) -> &'static str {
        self.tier.label()
    }

    /// Load as a whole percentage of capacity (rounded half away from zero).
    pub fn occupancy_pct(&self) -> u32 {
        (self.load_ratio * 100.0).round() as u32
    }
}

/// Compute the load ratio of `crowd_count` against `capacity` and classify it.
///
/// Pure: the same inputs always give the same result.
///
/// # Errors
/// [`EstimateError::DivisionByZero`] if `capacity` is zero.
pub fn classify(crowd_count: u32, capacity: u32) -> EstimateResult<CongestionResult> {
    if capacity == 0 {
        return Err(EstimateError::DivisionByZero { crowd_count });
    }
    let load_ratio = crowd_count as f64 / capacity as f64;
    Ok(CongestionResult {
        load_ratio,
        tier: Tier::from_load(load_ratio),
    })
}
