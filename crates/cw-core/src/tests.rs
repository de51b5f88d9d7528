//! Unit tests for cw-core primitives.

#[cfg(test)]
mod hour {
    use crate::{CoreError, Hour};

    #[test]
    fn accepts_full_day() {
        for h in 0..24 {
            assert_eq!(Hour::new(h).unwrap().get(), h);
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(Hour::new(24), Err(CoreError::InvalidHour(24)));
        assert!(Hour::try_from(99u32).is_err());
    }

    #[test]
    fn next_wraps_at_midnight() {
        assert_eq!(Hour::LAST.next(), Hour::MIDNIGHT);
        assert_eq!(Hour::new(9).unwrap().next(), Hour::new(10).unwrap());
    }

    #[test]
    fn all_yields_24_ordered_hours() {
        let hours: Vec<u32> = Hour::all().map(Hour::get).collect();
        assert_eq!(hours, (0..24).collect::<Vec<_>>());
    }

    #[test]
    fn display() {
        assert_eq!(Hour::new(7).unwrap().to_string(), "07:00");
    }
}

#[cfg(test)]
mod window {
    use crate::{CoreError, Hour, HourWindow};

    fn h(n: u32) -> Hour {
        Hour::new(n).unwrap()
    }

    #[test]
    fn peak_is_inclusive_at_both_ends() {
        let peak = HourWindow::PEAK;
        assert!(!peak.contains(h(9)));
        assert!(peak.contains(h(10)));
        assert!(peak.contains(h(14)));
        assert!(!peak.contains(h(15)));
        assert_eq!(peak.hour_count(), 5);
    }

    #[test]
    fn operating_hours() {
        assert_eq!(HourWindow::OPERATING.first(), h(6));
        assert_eq!(HourWindow::OPERATING.last(), h(20));
        assert_eq!(HourWindow::OPERATING.hour_count(), 15);
    }

    #[test]
    fn inverted_window_rejected() {
        let err = HourWindow::new(h(12), h(8)).unwrap_err();
        assert_eq!(err, CoreError::EmptyWindow { first: h(12), last: h(8) });
    }

    #[test]
    fn single_hour_window() {
        let w = HourWindow::new(h(5), h(5)).unwrap();
        assert_eq!(w.hour_count(), 1);
        assert_eq!(w.next_after(h(5)), h(5));
    }

    #[test]
    fn next_after_wraps_inside_window() {
        let w = HourWindow::OPERATING;
        assert_eq!(w.next_after(h(6)), h(7));
        assert_eq!(w.next_after(h(20)), h(6));
        // Outside the window snaps to the start.
        assert_eq!(w.next_after(h(2)), h(6));
        assert_eq!(w.next_after(h(23)), h(6));
    }
}

#[cfg(test)]
mod cycle {
    use crate::CycleId;

    #[test]
    fn next_and_display() {
        assert_eq!(CycleId::ZERO.next(), CycleId(1));
        assert_eq!(CycleId(12).to_string(), "C12");
    }
}

#[cfg(test)]
mod rng {
    use crate::{HourWindow, SimRng};

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SimRng::new(1);
        let mut b = SimRng::new(2);
        let va: Vec<u64> = (0..8).map(|_| a.random()).collect();
        let vb: Vec<u64> = (0..8).map(|_| b.random()).collect();
        assert_ne!(va, vb);
    }

    #[test]
    fn gen_range_inclusive_bounds() {
        let mut rng = SimRng::new(7);
        for _ in 0..10_000 {
            let v: u32 = rng.gen_range(1_000..=4_000);
            assert!((1_000..=4_000).contains(&v));
        }
    }

    #[test]
    fn hour_in_stays_inside_window() {
        let mut rng = SimRng::new(3);
        let mut seen_first = false;
        let mut seen_last = false;
        for _ in 0..10_000 {
            let h = rng.hour_in(HourWindow::OPERATING);
            assert!(HourWindow::OPERATING.contains(h), "got {h}");
            seen_first |= h == HourWindow::OPERATING.first();
            seen_last |= h == HourWindow::OPERATING.last();
        }
        assert!(seen_first && seen_last, "both endpoints should be reachable");
    }

    #[test]
    fn child_is_deterministic() {
        let mut root_a = SimRng::new(9);
        let mut root_b = SimRng::new(9);
        let mut ca = root_a.child(1);
        let mut cb = root_b.child(1);
        assert_eq!(ca.random::<u64>(), cb.random::<u64>());
    }
}
