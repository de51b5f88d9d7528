//! `cw-estimate` - the congestion estimator.
//!
//! # Pipeline
//!
//! ```text
//! for each route, for one simulated hour:
//!   ① Baseline  - one draw from a BaselineSource in [1000, 4000]
//!   ② Scale     - ×1.5 inside the peak window (10:00–14:00 inclusive),
//!                 truncated to an integer crowd count
//!   ③ Classify  - load = crowd / capacity
//!                   load < 0.5        → Low    "Safe"
//!                   0.5 ≤ load < 0.8  → Medium "Caution"
//!                   load ≥ 0.8        → High   "Congested"
//! ```
//!
//! The estimator holds configuration only.  All randomness flows through the
//! [`BaselineSource`] passed to each call, so tests substitute
//! [`FixedBaselines`] for the seeded [`cw_core::SimRng`].
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`source`]   | `BaselineSource` trait, `FixedBaselines`                |
//! | [`tier`]     | `Tier`, `CongestionResult`, `classify`                  |
//! | [`estimator`]| `EstimatorConfig`, `Estimator`, `CrowdEstimate`, `RouteStatus` |
//! | [`error`]    | `EstimateError`, `EstimateResult<T>`                    |

pub mod error;
pub mod estimator;
pub mod source;
pub mod tier;


pub use error::{EstimateError, EstimateResult};
pub use estimator::{CrowdEstimate, Estimator, EstimatorConfig, RouteStatus};
pub use source::{BaselineSource, FixedBaselines};
pub use tier::{classify, CongestionResult, Tier};
