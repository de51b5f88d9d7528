//! Loop configuration and hour selection.

use std::time::Duration;

use cw_core::{Hour, HourWindow, SimRng};

// ── MonitorConfig ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct MonitorConfig {
    /// Pause between the end of one cycle and the start of the next.
    /// Default: 5 s.
    pub cycle_interval: Duration,

    /// Stop after this many cycles.  `None` runs until cancelled.
    pub max_cycles: Option<u64>,

    /// End the run on the first route failure instead of reporting it and
    /// moving on.  Default: `false`.
    pub strict: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            cycle_interval: Duration::from_secs(5),
            max_cycles:     None,
            strict:         false,
        }
    }
}

// ── HourSelector ──────────────────────────────────────────────────────────────

/// Chooses the simulated hour for each cycle.
pub enum HourSelector {
    /// Every cycle uses the same hour.
    Fixed(Hour),

    /// Uniform draw from `window` (inclusive) each cycle.
    Random { window: HourWindow, rng: SimRng },

    /// Steps one hour per cycle through `window`, wrapping back to the start.
    Sweep { window: HourWindow, next: Hour },
}

impl HourSelector {
    /// Random hour within the gathering's operating window (06:00–20:00).
    pub fn random(rng: SimRng) -> Self {
        HourSelector::Random { window: HourWindow::OPERATING, rng }
    }

    /// Sweep through `window` starting at its first hour.
    pub fn sweep(window: HourWindow) -> Self {
        HourSelector::Sweep { window, next: window.first() }
    }

    /// Hour for the next cycle.
    pub fn select(&mut self) -> Hour {
        match self {
            HourSelector::Fixed(h) => *h,
            HourSelector::Random { window, rng } => rng.hour_in(*window),
            HourSelector::Sweep { window, next } => {
                let h = *next;
                *next = window.next_after(h);
                h
            }
        }
    }
}
