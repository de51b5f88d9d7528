//! The `Monitor` struct and its cycle loop.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use cw_core::{CycleId, Hour, SimRng};
use cw_estimate::{BaselineSource, EstimateError, Estimator, RouteStatus};
use cw_routes::{RouteId, RouteRegistry};

use crate::{CycleObserver, HourSelector, MonitorConfig, MonitorError, MonitorResult, RouteEvaluator};

// ── Cycle outputs ─────────────────────────────────────────────────────────────

/// A route that could not be evaluated in one cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteFailure {
    pub route_id: RouteId,
    pub hour:     Hour,
    pub error:    EstimateError,
}

impl fmt::Display for RouteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "route {} at hour {}: {}", self.route_id, self.hour, self.error)
    }
}

pub type RouteOutcome = Result<RouteStatus, RouteFailure>;

/// Everything one cycle produced, in registry order.
#[derive(Clone, Debug)]
pub struct CycleReport {
    pub cycle:    CycleId,
    pub hour:     Hour,
    pub outcomes: Vec<RouteOutcome>,
}

impl CycleReport {
    pub fn statuses(&self) -> impl Iterator<Item = &RouteStatus> + '_ {
        self.outcomes.iter().filter_map(|o| o.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &RouteFailure> + '_ {
        self.outcomes.iter().filter_map(|o| o.as_ref().err())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

// ── Monitor ───────────────────────────────────────────────────────────────────

/// The congestion monitor.
///
/// Owns the registry, the evaluator, the hour selector and the baseline
/// source.  The source is the only state that changes between cycles.
///
/// Create via [`MonitorBuilder`][crate::MonitorBuilder].
pub struct Monitor<E: RouteEvaluator = Estimator, S: BaselineSource = SimRng> {
    pub config: MonitorConfig,

    /// Routes, visited in definition order every cycle.
    pub registry: RouteRegistry,

    pub evaluator: E,

    pub hours: HourSelector,

    /// Baseline crowd draws.  One draw per route per cycle.
    pub source: S,

    /// Id the next cycle will run under.
    pub next_cycle: CycleId,
}

impl<E: RouteEvaluator, S: BaselineSource> Monitor<E, S> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until `config.max_cycles` is reached or `cancel` is raised.
    ///
    /// `cancel` is checked before each cycle and once more after each cycle,
    /// so a raised flag never interrupts a cycle half-way.
    pub fn run_until<O: CycleObserver>(&mut self, cancel: &AtomicBool, observer: &mut O) -> MonitorResult<()> {
        let mut completed: u64 = 0;
        loop {
            if cancel.load(Ordering::Relaxed) {
                info!(cycles = completed, "monitor cancelled");
                break;
            }
            if self.config.max_cycles.is_some_and(|max| completed >= max) {
                break;
            }

            self.step(observer)?;
            completed += 1;

            let more = !self.config.max_cycles.is_some_and(|max| completed >= max);
            if more && !cancel.load(Ordering::Relaxed) {
                self.pause();
            }
        }
        Ok(())
    }

    /// Run exactly `n` cycles (capped by `config.max_cycles`), pausing
    /// between them.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_cycles<O: CycleObserver>(&mut self, n: u64, observer: &mut O) -> MonitorResult<()> {
        let n = self.config.max_cycles.map_or(n, |max| n.min(max));
        for i in 0..n {
            self.step(observer)?;
            if i + 1 < n {
                self.pause();
            }
        }
        Ok(())
    }

    /// Pick an hour and evaluate every route once.
    ///
    /// Never pauses.  Route failures are recorded in the report, not
    /// returned.
    pub fn run_cycle<O: CycleObserver>(&mut self, observer: &mut O) -> CycleReport {
        let cycle = self.next_cycle;
        self.next_cycle = cycle.next();

        let hour = self.hours.select();
        observer.on_cycle_start(cycle, hour);

        let mut outcomes = Vec::with_capacity(self.registry.len());
        for route in self.registry.iter() {
            match self.evaluator.evaluate(route, hour, &mut self.source) {
                Ok(status) => {
                    observer.on_route(&status);
                    outcomes.push(Ok(status));
                }
                Err(error) => {
                    let failure = RouteFailure { route_id: route.id().clone(), hour, error };
                    warn!(route = %failure.route_id, %hour, error = %failure.error, "route evaluation failed");
                    observer.on_route_failed(&failure);
                    outcomes.push(Err(failure));
                }
            }
        }

        let report = CycleReport { cycle, hour, outcomes };
        info!(
            %cycle,
            %hour,
            routes = report.outcomes.len(),
            failed = report.failure_count(),
            "cycle complete"
        );
        observer.on_cycle_end(&report);
        report
    }

    // ── Loop helpers ──────────────────────────────────────────────────────

    /// One cycle plus the strict-mode and observer-health checks.
    fn step<O: CycleObserver>(&mut self, observer: &mut O) -> MonitorResult<()> {
        let report = self.run_cycle(observer);
        if observer.failed() {
            return Err(MonitorError::OutputFailed);
        }
        if self.config.strict {
            if let Some(failure) = report.outcomes.into_iter().find_map(Result::err) {
                return Err(MonitorError::Route(failure));
            }
        }
        Ok(())
    }

    fn pause(&self) {
        if !self.config.cycle_interval.is_zero() {
            std::thread::sleep(self.config.cycle_interval);
        }
    }
}
