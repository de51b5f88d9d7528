//! Simulated time model.
//!
//! # Design
//!
//! The monitor does not track wall-clock time.  Each evaluation cycle is
//! stamped with a simulated hour of day (`Hour`, 0–23) and a monotonically
//! increasing `CycleId`.  Time-of-day rules (the peak window, the gathering's
//! operating hours) are expressed as inclusive `HourWindow`s so that boundary
//! hours are always part of the window they name.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Hour ─────────────────────────────────────────────────────────────────────

/// An hour of the simulated day, guaranteed to lie in `0..=23`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct Hour(u8);

impl Hour {
    pub const MIDNIGHT: Hour = Hour(0);
    pub const LAST: Hour = Hour(23);

    /// Validate and wrap an hour of day.
    pub fn new(h: u32) -> CoreResult<Hour> {
        if h > 23 {
            return Err(CoreError::InvalidHour(h));
        }
        Ok(Hour(h as u8))
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0 as u32
    }

    /// The following hour, wrapping 23 → 0.
    #[inline]
    pub fn next(self) -> Hour {
        Hour((self.0 + 1) % 24)
    }

    /// All 24 hours in order.
    pub fn all() -> impl Iterator<Item = Hour> {
        (0u8..24).map(Hour)
    }
}

impl TryFrom<u32> for Hour {
    type Error = CoreError;
    fn try_from(h: u32) -> CoreResult<Hour> {
        Hour::new(h)
    }
}

impl From<Hour> for u32 {
    #[inline]
    fn from(h: Hour) -> u32 {
        h.get()
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

// ── HourWindow ───────────────────────────────────────────────────────────────

/// An inclusive range of hours, `first..=last`, that does not wrap midnight.
///
/// Fields are private so every window in circulation satisfies
/// `first <= last`; build one with [`HourWindow::new`] or use a constant.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "WindowBounds"))]
pub struct HourWindow {
    first: Hour,
    last:  Hour,
}

impl HourWindow {
    /// Hours 10 through 14, when crowds swell.
    pub const PEAK: HourWindow = HourWindow { first: Hour(10), last: Hour(14) };

    /// Hours 6 through 20, when the gathering is open.
    pub const OPERATING: HourWindow = HourWindow { first: Hour(6), last: Hour(20) };

    pub fn new(first: Hour, last: Hour) -> CoreResult<HourWindow> {
        if first > last {
            return Err(CoreError::EmptyWindow { first, last });
        }
        Ok(HourWindow { first, last })
    }

    #[inline]
    pub fn first(&self) -> Hour {
        self.first
    }

    #[inline]
    pub fn last(&self) -> Hour {
        self.last
    }

    /// `true` if `first <= hour <= last`.
    #[inline]
    pub fn contains(&self, hour: Hour) -> bool {
        self.first <= hour && hour <= self.last
    }

    /// Number of hours in the window (at least 1).
    #[inline]
    pub fn hour_count(&self) -> u32 {
        self.last.get() - self.first.get() + 1
    }

    /// The hour after `hour`, wrapping from `last` back to `first`.
    ///
    /// Hours outside the window snap to `first`.
    pub fn next_after(&self, hour: Hour) -> Hour {
        if hour < self.first || hour >= self.last {
            self.first
        } else {
            hour.next()
        }
    }
}

/// Unchecked wire shape; deserialisation goes through [`HourWindow::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct WindowBounds {
    first: Hour,
    last:  Hour,
}

#[cfg(feature = "serde")]
impl TryFrom<WindowBounds> for HourWindow {
    type Error = CoreError;
    fn try_from(b: WindowBounds) -> CoreResult<HourWindow> {
        HourWindow::new(b.first, b.last)
    }
}

impl fmt::Display for HourWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}

// ── CycleId ──────────────────────────────────────────────────────────────────

/// Sequence number of an evaluation cycle within one process lifetime.
///
/// Never persisted; restarts from zero on every run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleId(pub u64);

impl CycleId {
    pub const ZERO: CycleId = CycleId(0);

    #[inline]
    pub fn next(self) -> CycleId {
        CycleId(self.0 + 1)
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}
