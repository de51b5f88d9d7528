//! Observer trait for emitting cycle results.

use cw_core::{CycleId, Hour};
use cw_estimate::RouteStatus;

use crate::{CycleReport, RouteFailure};

/// Callbacks invoked by [`Monitor`][crate::Monitor] while a cycle runs.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Route callbacks arrive in registry order.
pub trait CycleObserver {
    /// Called once the hour is chosen, before any route is evaluated.
    fn on_cycle_start(&mut self, _cycle: CycleId, _hour: Hour) {}

    /// Called for each route that evaluated successfully.
    fn on_route(&mut self, _status: &RouteStatus) {}

    /// Called for each route whose evaluation failed.  The cycle continues
    /// with the next route unless the monitor runs in strict mode.
    fn on_route_failed(&mut self, _failure: &RouteFailure) {}

    /// Called after every route has been visited.
    fn on_cycle_end(&mut self, _report: &CycleReport) {}

    /// `true` once the observer can no longer emit output.  The monitor stops
    /// at the end of the current cycle.
    fn failed(&self) -> bool {
        false
    }
}

/// A [`CycleObserver`] that does nothing.
pub struct NoopObserver;

impl CycleObserver for NoopObserver {}
