//! Status reporters: [`CycleObserver`]s that write each cycle to a stream.
//!
//! Write errors are stored internally because observer methods have no
//! return value.  The first error is kept, [`CycleObserver::failed`] turns
//! `true` so the monitor stops, and the caller retrieves the error with
//! `take_error`.

use std::io::{self, Write};

use serde::Serialize;

use cw_core::{CycleId, Hour};
use cw_estimate::{RouteStatus, Tier};

use crate::{CycleObserver, CycleReport, RouteFailure};

// ── Shared error slot ─────────────────────────────────────────────────────────

#[derive(Default)]
struct ErrorSlot {
    first:  Option<io::Error>,
    failed: bool,
}

impl ErrorSlot {
    fn store(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            self.failed = true;
            // Keep only the first error.
            if self.first.is_none() {
                self.first = Some(e);
            }
        }
    }
}

// ── TextReporter ──────────────────────────────────────────────────────────────

/// Human-readable readout, one header per cycle then one line per route:
///
/// ```text
/// Current hour: 12:00 (cycle C0)
/// A: Crowd = 3000 / 4000 → Caution (Medium)
/// B: Crowd = 4500 / 7000 → Caution (Medium)
/// ```
pub struct TextReporter<W: Write> {
    out:    W,
    errors: ErrorSlot,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, errors: ErrorSlot::default() }
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.errors.first.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CycleObserver for TextReporter<W> {
    fn on_cycle_start(&mut self, cycle: CycleId, hour: Hour) {
        let result = writeln!(self.out, "Current hour: {hour} (cycle {cycle})");
        self.errors.store(result);
    }

    fn on_route(&mut self, status: &RouteStatus) {
        let result = writeln!(self.out, "{status}");
        self.errors.store(result);
    }

    fn on_route_failed(&mut self, failure: &RouteFailure) {
        let result = writeln!(
            self.out,
            "{}: evaluation failed at {}: {}",
            failure.route_id, failure.hour, failure.error
        );
        self.errors.store(result);
    }

    fn on_cycle_end(&mut self, _report: &CycleReport) {
        let result = writeln!(self.out).and_then(|()| self.out.flush());
        self.errors.store(result);
    }

    fn failed(&self) -> bool {
        self.errors.failed
    }
}

// ── JsonReporter ──────────────────────────────────────────────────────────────

/// One JSON object per line, per route.
#[derive(Serialize)]
struct StatusRow<'a> {
    cycle:       u64,
    hour:        u32,
    route_id:    &'a str,
    crowd_count: u32,
    capacity:    u32,
    load_ratio:  f64,
    tier:        Tier,
    label:       &'static str,
}

#[derive(Serialize)]
struct FailureRow<'a> {
    cycle:    u64,
    hour:     u32,
    route_id: &'a str,
    error:    String,
}

/// Machine-readable readout: one JSON line per route.
///
/// ```text
/// {"cycle":0,"hour":12,"route_id":"A","crowd_count":3000,"capacity":4000,"load_ratio":0.75,"tier":"Medium","label":"Caution"}
/// ```
pub struct JsonReporter<W: Write> {
    out:    W,
    cycle:  CycleId,
    errors: ErrorSlot,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, cycle: CycleId::ZERO, errors: ErrorSlot::default() }
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.errors.first.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_row<T: Serialize>(&mut self, row: &T) {
        let result = serde_json::to_writer(&mut self.out, row)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(self.out));
        self.errors.store(result);
    }
}

impl<W: Write> CycleObserver for JsonReporter<W> {
    fn on_cycle_start(&mut self, cycle: CycleId, _hour: Hour) {
        self.cycle = cycle;
    }

    fn on_route(&mut self, status: &RouteStatus) {
        let row = StatusRow {
            cycle:       self.cycle.0,
            hour:        status.estimate.hour.get(),
            route_id:    status.estimate.route_id.as_str(),
            crowd_count: status.estimate.crowd_count,
            capacity:    status.capacity,
            load_ratio:  status.congestion.load_ratio,
            tier:        status.congestion.tier,
            label:       status.congestion.label(),
        };
        self.write_row(&row);
    }

    fn on_route_failed(&mut self, failure: &RouteFailure) {
        let row = FailureRow {
            cycle:    self.cycle.0,
            hour:     failure.hour.get(),
            route_id: failure.route_id.as_str(),
            error:    failure.error.to_string(),
        };
        self.write_row(&row);
    }

    fn on_cycle_end(&mut self, _report: &CycleReport) {
        let result = self.out.flush();
        self.errors.store(result);
    }

    fn failed(&self) -> bool {
        self.errors.failed
    }
}
