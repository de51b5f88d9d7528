//! Tests for cw-monitor.

use std::time::Duration;

use cw_core::{Hour, HourWindow, SimRng};
use cw_estimate::{
    BaselineSource, EstimateError, EstimateResult, Estimator, FixedBaselines, RouteStatus, Tier,
};
use cw_routes::{RegistryBuilder, Route, RouteRegistry};

use crate::{
    CycleObserver, CycleReport, HourSelector, Monitor, MonitorBuilder, MonitorConfig, MonitorError,
    NoopObserver, RouteEvaluator, RouteFailure,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn h(n: u32) -> Hour {
    Hour::new(n).unwrap()
}

fn quick(max_cycles: Option<u64>) -> MonitorConfig {
    MonitorConfig {
        cycle_interval: Duration::ZERO,
        max_cycles,
        strict: false,
    }
}

/// A: capacity 4000, B: capacity 7000.
fn two_routes() -> RouteRegistry {
    RegistryBuilder::new()
        .add_route("A", 1.0, 4_000)
        .add_route("B", 1.0, 7_000)
        .build()
        .unwrap()
}

fn fixed_monitor(hour: u32, baselines: Vec<u32>) -> Monitor<Estimator, FixedBaselines> {
    MonitorBuilder::new(two_routes(), FixedBaselines::new(baselines))
        .hours(HourSelector::Fixed(h(hour)))
        .config(quick(None))
        .build()
        .unwrap()
}

/// Records every callback as a string.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl CycleObserver for Recorder {
    fn on_cycle_start(&mut self, cycle: cw_core::CycleId, hour: Hour) {
        self.events.push(format!("start {cycle} {}", hour.get()));
    }
    fn on_route(&mut self, status: &RouteStatus) {
        self.events.push(format!("ok {}", status.estimate.route_id));
    }
    fn on_route_failed(&mut self, failure: &RouteFailure) {
        self.events.push(format!("fail {}", failure.route_id));
    }
    fn on_cycle_end(&mut self, report: &CycleReport) {
        self.events.push(format!("end {}", report.cycle));
    }
}

/// Delegates to `Estimator` except for one route, which always fails.
struct FailOn(&'static str);

impl RouteEvaluator for FailOn {
    fn evaluate(
        &self,
        route:  &Route,
        hour:   Hour,
        source: &mut dyn BaselineSource,
    ) -> EstimateResult<RouteStatus> {
        if route.id() == self.0 {
            return Err(EstimateError::DivisionByZero { crowd_count: 0 });
        }
        Estimator::default().evaluate_route(route, hour, source)
    }
}

// ── Hour selection ────────────────────────────────────────────────────────────

#[cfg(test)]
mod hours {
    use super::*;

    #[test]
    fn fixed_repeats() {
        let mut sel = HourSelector::Fixed(h(12));
        for _ in 0..5 {
            assert_eq!(sel.select(), h(12));
        }
    }

    #[test]
    fn random_stays_in_operating_window() {
        let mut sel = HourSelector::random(SimRng::new(42));
        for _ in 0..5_000 {
            let hour = sel.select();
            assert!((6..=20).contains(&hour.get()), "got {hour}");
        }
    }

    #[test]
    fn random_honours_custom_window() {
        let window = HourWindow::new(h(8), h(12)).unwrap();
        let mut sel = HourSelector::Random { window, rng: SimRng::new(5) };
        for _ in 0..2_000 {
            let hour = sel.select();
            assert!((8..=12).contains(&hour.get()), "got {hour}");
        }
    }

    #[test]
    fn inverted_window_never_reaches_a_selector() {
        assert!(HourWindow::new(h(12), h(8)).is_err());
        let decoded = serde_json::from_str::<HourWindow>(r#"{"first":12,"last":8}"#);
        assert!(decoded.is_err());
        let ok: HourWindow = serde_json::from_str(r#"{"first":8,"last":12}"#).unwrap();
        assert_eq!((ok.first(), ok.last()), (h(8), h(12)));
    }

    #[test]
    fn sweep_wraps() {
        let window = HourWindow::new(h(18), h(20)).unwrap();
        let mut sel = HourSelector::sweep(window);
        let seq: Vec<u32> = (0..5).map(|_| sel.select().get()).collect();
        assert_eq!(seq, [18, 19, 20, 18, 19]);
    }
}

// ── Single cycle ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod cycle {
    use super::*;

    #[test]
    fn peak_end_to_end_scenario() {
        let mut m = fixed_monitor(12, vec![2_000, 3_000]);
        let report = m.run_cycle(&mut NoopObserver);

        assert_eq!(report.hour, h(12));
        let statuses: Vec<&RouteStatus> = report.statuses().collect();
        assert_eq!(statuses.len(), 2);

        assert_eq!(statuses[0].estimate.route_id.as_str(), "A");
        assert_eq!(statuses[0].estimate.crowd_count, 3_000);
        assert_eq!(statuses[0].congestion.load_ratio, 0.75);
        assert_eq!(statuses[0].congestion.tier, Tier::Medium);
        assert_eq!(statuses[0].congestion.label(), "Caution");

        assert_eq!(statuses[1].estimate.route_id.as_str(), "B");
        assert_eq!(statuses[1].estimate.crowd_count, 4_500);
        assert!((statuses[1].congestion.load_ratio - 0.6429).abs() < 1e-4);
        assert_eq!(statuses[1].congestion.tier, Tier::Medium);
    }

    #[test]
    fn off_peak_is_unscaled() {
        let mut m = fixed_monitor(8, vec![2_000, 3_000]);
        let report = m.run_cycle(&mut NoopObserver);
        let counts: Vec<u32> = report.statuses().map(|s| s.estimate.crowd_count).collect();
        assert_eq!(counts, [2_000, 3_000]);
    }

    #[test]
    fn one_draw_per_route() {
        let mut m = fixed_monitor(8, vec![1_000]);
        m.run_cycle(&mut NoopObserver);
        m.run_cycle(&mut NoopObserver);
        assert_eq!(m.source.draws(), 4);
    }

    #[test]
    fn callbacks_in_registry_order() {
        let mut m = fixed_monitor(9, vec![1_000]);
        let mut rec = Recorder::default();
        m.run_cycle(&mut rec);
        assert_eq!(rec.events, ["start C0 9", "ok A", "ok B", "end C0"]);
    }

    #[test]
    fn cycle_ids_increase() {
        let mut m = fixed_monitor(9, vec![1_000]);
        assert_eq!(m.run_cycle(&mut NoopObserver).cycle.0, 0);
        assert_eq!(m.run_cycle(&mut NoopObserver).cycle.0, 1);
        assert_eq!(m.next_cycle.0, 2);
    }

    #[test]
    fn failing_route_does_not_abort_cycle() {
        let mut m = MonitorBuilder::new(two_routes(), FixedBaselines::constant(2_000))
            .evaluator(FailOn("A"))
            .hours(HourSelector::Fixed(h(12)))
            .config(quick(None))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        let report = m.run_cycle(&mut rec);

        assert_eq!(rec.events, ["start C0 12", "fail A", "ok B", "end C0"]);
        assert_eq!(report.failure_count(), 1);
        let failure = report.failures().next().unwrap();
        assert_eq!(failure.route_id.as_str(), "A");
        assert_eq!(failure.hour, h(12));
        assert_eq!(report.statuses().count(), 1);
    }

    #[test]
    fn failure_message_names_route_and_hour() {
        let f = RouteFailure {
            route_id: "Kali Sadak".into(),
            hour:     h(13),
            error:    EstimateError::DivisionByZero { crowd_count: 10 },
        };
        let msg = f.to_string();
        assert!(msg.contains("Kali Sadak") && msg.contains("13:00"), "got {msg}");
    }
}

// ── Loop control ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod run {
    use std::sync::atomic::AtomicBool;

    use super::*;

    /// Counts cycles and raises a flag after `stop_after` of them.
    struct StopAfter<'a> {
        cycles:     u64,
        stop_after: u64,
        flag:       &'a AtomicBool,
    }

    impl CycleObserver for StopAfter<'_> {
        fn on_cycle_end(&mut self, _report: &CycleReport) {
            self.cycles += 1;
            if self.cycles >= self.stop_after {
                self.flag.store(true, std::sync::atomic::Ordering::Relaxed);
            }
        }
    }

    #[test]
    fn run_cycles_runs_exactly_n() {
        let mut m = fixed_monitor(9, vec![1_000]);
        let mut rec = Recorder::default();
        m.run_cycles(3, &mut rec).unwrap();
        let ends = rec.events.iter().filter(|e| e.starts_with("end")).count();
        assert_eq!(ends, 3);
    }

    #[test]
    fn run_cycles_capped_by_max_cycles() {
        let mut m = fixed_monitor(9, vec![1_000]);
        m.config.max_cycles = Some(2);
        m.run_cycles(10, &mut NoopObserver).unwrap();
        assert_eq!(m.next_cycle.0, 2);
    }

    #[test]
    fn run_until_honours_max_cycles() {
        let mut m = fixed_monitor(9, vec![1_000]);
        m.config.max_cycles = Some(4);
        let cancel = AtomicBool::new(false);
        m.run_until(&cancel, &mut NoopObserver).unwrap();
        assert_eq!(m.next_cycle.0, 4);
    }

    #[test]
    fn run_until_stops_when_cancelled() {
        let mut m = fixed_monitor(9, vec![1_000]);
        let cancel = AtomicBool::new(false);
        let mut obs = StopAfter { cycles: 0, stop_after: 3, flag: &cancel };
        m.run_until(&cancel, &mut obs).unwrap();
        assert_eq!(obs.cycles, 3);
    }

    #[test]
    fn pre_cancelled_runs_nothing() {
        let mut m = fixed_monitor(9, vec![1_000]);
        let cancel = AtomicBool::new(true);
        m.run_until(&cancel, &mut NoopObserver).unwrap();
        assert_eq!(m.next_cycle.0, 0);
    }

    #[test]
    fn interval_is_slept_between_cycles_only() {
        let mut m = fixed_monitor(9, vec![1_000]);
        m.config.cycle_interval = Duration::from_millis(20);
        let t0 = std::time::Instant::now();
        m.run_cycles(3, &mut NoopObserver).unwrap();
        let elapsed = t0.elapsed();
        assert!(elapsed >= Duration::from_millis(40), "elapsed {elapsed:?}");
    }

    #[test]
    fn strict_mode_stops_on_failure() {
        let mut m = MonitorBuilder::new(two_routes(), FixedBaselines::constant(2_000))
            .evaluator(FailOn("B"))
            .hours(HourSelector::Fixed(h(7)))
            .config(MonitorConfig { strict: true, ..quick(None) })
            .build()
            .unwrap();
        let err = m.run_cycles(5, &mut NoopObserver).unwrap_err();
        match err {
            MonitorError::Route(f) => {
                assert_eq!(f.route_id.as_str(), "B");
                assert_eq!(f.hour, h(7));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(m.next_cycle.0, 1);
    }

    #[test]
    fn lenient_mode_keeps_going() {
        let mut m = MonitorBuilder::new(two_routes(), FixedBaselines::constant(2_000))
            .evaluator(FailOn("B"))
            .hours(HourSelector::Fixed(h(7)))
            .config(quick(None))
            .build()
            .unwrap();
        m.run_cycles(3, &mut NoopObserver).unwrap();
        assert_eq!(m.next_cycle.0, 3);
    }

    #[test]
    fn zero_max_cycles_rejected() {
        let result = MonitorBuilder::new(two_routes(), FixedBaselines::constant(1_000))
            .config(quick(Some(0)))
            .build();
        assert!(matches!(result, Err(MonitorError::Config(_))));
    }

    #[test]
    fn default_hours_sweep_operating_window() {
        let mut m = MonitorBuilder::new(two_routes(), SimRng::new(1))
            .config(quick(None))
            .build()
            .unwrap();
        let hours: Vec<u32> = (0..3).map(|_| m.run_cycle(&mut NoopObserver).hour.get()).collect();
        assert_eq!(hours, [6, 7, 8]);
    }

    #[test]
    fn seeded_runs_replay() {
        let run = |seed| {
            let mut root = SimRng::new(seed);
            let hours = HourSelector::random(root.child(1));
            let mut m = MonitorBuilder::new(RouteRegistry::default_routes().unwrap(), root)
                .hours(hours)
                .config(quick(None))
                .build()
                .unwrap();
            (0..5)
                .flat_map(|_| {
                    let r = m.run_cycle(&mut NoopObserver);
                    let hour = r.hour.get();
                    r.outcomes
                        .into_iter()
                        .map(move |o| (hour, o.unwrap().estimate.crowd_count))
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(99), run(99));
    }
}

// ── Reporters ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod reporters {
    use std::io::{self, Write};

    use super::*;
    use crate::{JsonReporter, TextReporter};

    /// A writer that always fails.
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn text_readout() {
        let mut m = fixed_monitor(12, vec![2_000, 3_000]);
        let mut rep = TextReporter::new(Vec::new());
        m.run_cycles(1, &mut rep).unwrap();
        let text = String::from_utf8(rep.into_inner()).unwrap();
        assert_eq!(
            text,
            "Current hour: 12:00 (cycle C0)\n\
             A: Crowd = 3000 / 4000 → Caution (Medium)\n\
             B: Crowd = 4500 / 7000 → Caution (Medium)\n\
             \n"
        );
    }

    #[test]
    fn text_reports_failures_inline() {
        let mut m = MonitorBuilder::new(two_routes(), FixedBaselines::constant(2_000))
            .evaluator(FailOn("A"))
            .hours(HourSelector::Fixed(h(12)))
            .config(quick(None))
            .build()
            .unwrap();
        let mut rep = TextReporter::new(Vec::new());
        m.run_cycles(1, &mut rep).unwrap();
        let text = String::from_utf8(rep.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with("A: evaluation failed at 12:00"), "got {:?}", lines[1]);
        assert_eq!(lines[2], "B: Crowd = 3000 / 7000 → Safe (Low)");
    }

    #[test]
    fn json_lines() {
        let mut m = fixed_monitor(12, vec![2_000, 3_000]);
        let mut rep = JsonReporter::new(Vec::new());
        m.run_cycles(1, &mut rep).unwrap();
        let text = String::from_utf8(rep.into_inner()).unwrap();
        let rows: Vec<serde_json::Value> =
            text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["route_id"], "A");
        assert_eq!(rows[0]["hour"], 12);
        assert_eq!(rows[0]["crowd_count"], 3_000);
        assert_eq!(rows[0]["tier"], "Medium");
        assert_eq!(rows[0]["label"], "Caution");
        assert_eq!(rows[1]["capacity"], 7_000);
    }

    #[test]
    fn broken_output_stops_the_loop() {
        let mut m = fixed_monitor(12, vec![2_000]);
        let mut rep = TextReporter::new(Broken);
        let err = m.run_cycles(5, &mut rep).unwrap_err();
        assert!(matches!(err, MonitorError::OutputFailed));
        assert_eq!(m.next_cycle.0, 1);
        let io_err = rep.take_error().unwrap();
        assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);
        assert!(rep.take_error().is_none());
    }
}
