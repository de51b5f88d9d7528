//! Time-dependent crowd estimation.

use std::fmt;

use tracing::debug;

use cw_core::{Hour, HourWindow};
use cw_routes::{Route, RouteId};

use crate::{classify, BaselineSource, CongestionResult, EstimateError, EstimateResult};

// ── EstimatorConfig ───────────────────────────────────────────────────────────

/// Tunables for [`Estimator`].  The defaults are the production contract.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EstimatorConfig {
    /// Smallest baseline crowd drawn (inclusive).  Default: 1000.
    pub baseline_min: u32,

    /// Largest baseline crowd drawn (inclusive).  Default: 4000.
    pub baseline_max: u32,

    /// Hours during which the baseline is scaled up.  Default: 10–14.
    pub peak: HourWindow,

    /// Scale applied inside `peak`.  Default: 1.5.
    pub peak_multiplier: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            baseline_min:    1_000,
            baseline_max:    4_000,
            peak:            HourWindow::PEAK,
            peak_multiplier: 1.5,
        }
    }
}

// ── Outputs ───────────────────────────────────────────────────────────────────

/// One crowd estimate for one route at one hour.  Not persisted.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrowdEstimate {
    pub route_id:    RouteId,
    pub hour:        Hour,
    /// The raw draw, before the peak multiplier.
    pub baseline:    u32,
    pub crowd_count: u32,
}

/// A classified estimate: everything needed to print one status line.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteStatus {
    pub estimate:   CrowdEstimate,
    pub capacity:   u32,
    pub congestion: CongestionResult,
}

impl fmt::Display for RouteStatus {
    /// `<route_id>: Crowd = <crowd_count> / <capacity> → <label> (<tier>)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Crowd = {} / {} → {} ({})",
            self.estimate.route_id,
            self.estimate.crowd_count,
            self.capacity,
            self.congestion.label(),
            self.congestion.tier,
        )
    }
}

// ── Estimator ─────────────────────────────────────────────────────────────────

/// Stateless crowd estimator.
///
/// Holds configuration only; the randomness source is borrowed per call.
#[derive(Clone, Debug)]
pub struct Estimator {
    config: EstimatorConfig,
}

impl Default for Estimator {
    fn default() -> Self {
        Estimator { config: EstimatorConfig::default() }
    }
}

impl Estimator {
    /// # Errors
    /// [`EstimateError::Config`] if the baseline range is empty, the peak
    /// multiplier is not a positive finite number, or a peak-hour crowd
    /// (`baseline_max × peak_multiplier`) would not fit in a `u32`.
    pub fn new(config: EstimatorConfig) -> EstimateResult<Estimator> {
        if config.baseline_min > config.baseline_max {
            return Err(EstimateError::Config(format!(
                "baseline range {}..={} is empty",
                config.baseline_min, config.baseline_max
            )));
        }
        if !config.peak_multiplier.is_finite() || config.peak_multiplier <= 0.0 {
            return Err(EstimateError::Config(format!(
                "peak multiplier must be positive, got {}",
                config.peak_multiplier
            )));
        }
        let largest = f64::from(config.baseline_max) * config.peak_multiplier.max(1.0);
        if largest > f64::from(u32::MAX) {
            return Err(EstimateError::Config(format!(
                "baseline max {} × peak multiplier {} overflows the crowd count",
                config.baseline_max, config.peak_multiplier
            )));
        }
        Ok(Estimator { config })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Multiplier in effect at `hour`.
    #[inline]
    pub fn multiplier(&self, hour: Hour) -> f64 {
        if self.config.peak.contains(hour) {
            self.config.peak_multiplier
        } else {
            1.0
        }
    }

    /// Estimate the crowd on `route_id` at `hour`.
    ///
    /// Draws exactly one baseline from `source` and returns
    /// `floor(baseline × multiplier(hour))`.
    pub fn estimate_crowd<S>(&self, route_id: &RouteId, hour: Hour, source: &mut S) -> CrowdEstimate
    where
        S: BaselineSource + ?Sized,
    {
        let baseline = source.draw_baseline(self.config.baseline_min..=self.config.baseline_max);
        let crowd_count = (baseline as f64 * self.multiplier(hour)).floor() as u32;
        CrowdEstimate {
            route_id: route_id.clone(),
            hour,
            baseline,
            crowd_count,
        }
    }

    /// Estimate and classify one route.
    ///
    /// # Errors
    /// Propagates [`classify`] failures.
    pub fn evaluate_route<S>(&self, route: &Route, hour: Hour, source: &mut S) -> EstimateResult<RouteStatus>
    where
        S: BaselineSource + ?Sized,
    {
        let estimate = self.estimate_crowd(route.id(), hour, source);
        let congestion = classify(estimate.crowd_count, route.capacity())?;
        debug!(
            route = %route.id(),
            %hour,
            crowd = estimate.crowd_count,
            load = congestion.load_ratio,
            tier = %congestion.tier,
            "route evaluated"
        );
        Ok(RouteStatus {
            estimate,
            capacity: route.capacity(),
            congestion,
        })
    }
}
