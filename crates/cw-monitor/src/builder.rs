//! Fluent builder for constructing a [`Monitor`].

use cw_core::{CycleId, HourWindow, SimRng};
use cw_estimate::{BaselineSource, Estimator};
use cw_routes::RouteRegistry;

use crate::{HourSelector, Monitor, MonitorConfig, MonitorError, MonitorResult, RouteEvaluator};

/// Fluent builder for [`Monitor<E, S>`].
///
/// # Required inputs
///
/// - [`RouteRegistry`] - the routes to evaluate
/// - `S: BaselineSource` - baseline draws (a [`SimRng`] in production)
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                        |
/// |-------------------|------------------------------------------------|
/// | `.evaluator(e)`   | `Estimator::default()`                         |
/// | `.hours(h)`       | Sweep through 06:00–20:00                      |
/// | `.config(c)`      | `MonitorConfig::default()` (5 s, unbounded)    |
///
/// # Example
///
/// ```rust,ignore
/// let mut monitor = MonitorBuilder::new(registry, SimRng::new(7))
///     .hours(HourSelector::Fixed(Hour::new(12)?))
///     .config(MonitorConfig { max_cycles: Some(3), ..Default::default() })
///     .build()?;
/// monitor.run_until(&cancel, &mut reporter)?;
/// ```
pub struct MonitorBuilder<E: RouteEvaluator = Estimator, S: BaselineSource = SimRng> {
    registry:  RouteRegistry,
    source:    S,
    evaluator: E,
    hours:     Option<HourSelector>,
    config:    MonitorConfig,
}

impl<S: BaselineSource> MonitorBuilder<Estimator, S> {
    /// Create a builder with the default estimator.
    pub fn new(registry: RouteRegistry, source: S) -> Self {
        Self {
            registry,
            source,
            evaluator: Estimator::default(),
            hours:     None,
            config:    MonitorConfig::default(),
        }
    }
}

impl<E: RouteEvaluator, S: BaselineSource> MonitorBuilder<E, S> {
    /// Replace the evaluator (e.g. an `Estimator` with a custom config).
    pub fn evaluator<E2: RouteEvaluator>(self, evaluator: E2) -> MonitorBuilder<E2, S> {
        MonitorBuilder {
            registry: self.registry,
            source:   self.source,
            evaluator,
            hours:    self.hours,
            config:   self.config,
        }
    }

    pub fn hours(mut self, hours: HourSelector) -> Self {
        self.hours = Some(hours);
        self
    }

    pub fn config(mut self, config: MonitorConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate inputs and return a ready-to-run [`Monitor`].
    pub fn build(self) -> MonitorResult<Monitor<E, S>> {
        if self.config.max_cycles == Some(0) {
            return Err(MonitorError::Config("max_cycles must be at least 1".into()));
        }

        Ok(Monitor {
            config:     self.config,
            registry:   self.registry,
            evaluator:  self.evaluator,
            hours:      self.hours.unwrap_or_else(|| HourSelector::sweep(HourWindow::OPERATING)),
            source:     self.source,
            next_cycle: CycleId::ZERO,
        })
    }
}
