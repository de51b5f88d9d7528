//! `cw-monitor` - the congestion monitoring loop.
//!
//! # Cycle loop
//!
//! ```text
//! loop:
//!   ① Hour      - HourSelector picks the simulated hour for this cycle
//!   ② Evaluate  - for each route in registry order:
//!                   estimate_crowd → classify
//!                   success → observer.on_route
//!                   failure → observer.on_route_failed, continue
//!   ③ Report    - observer.on_cycle_end with the full CycleReport
//!   ④ Wait      - sleep for config.cycle_interval (skipped after the last
//!                 cycle and when cancelled)
//! ```
//!
//! Everything runs on the caller's thread.  The loop ends after
//! `max_cycles`, after the count passed to [`Monitor::run_cycles`], when the
//! cancellation flag given to [`Monitor::run_until`] is raised, or when an
//! observer reports that its output has failed.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cw_core::SimRng;
//! use cw_monitor::{HourSelector, MonitorBuilder, TextReporter};
//! use cw_routes::RouteRegistry;
//!
//! let mut root = SimRng::new(42);
//! let hours = HourSelector::random(root.child(1));
//! let mut monitor = MonitorBuilder::new(RouteRegistry::default_routes()?, root)
//!     .hours(hours)
//!     .build()?;
//! monitor.run_cycles(3, &mut TextReporter::new(std::io::stdout()))?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod monitor;
pub mod observer;
pub mod report;

#[cfg(test)]
mod tests;

pub use builder::MonitorBuilder;
pub use config::{HourSelector, MonitorConfig};
pub use error::{MonitorError, MonitorResult};
pub use evaluator::RouteEvaluator;
pub use monitor::{CycleReport, Monitor, RouteFailure, RouteOutcome};
pub use observer::{CycleObserver, NoopObserver};
pub use report::{JsonReporter, TextReporter};
