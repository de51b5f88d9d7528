//! `cw-core` - foundational types for the `crowdwatch` congestion monitor.
//!
//! This crate is a dependency of every other `cw-*` crate.  It intentionally
//! has no `cw-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                          |
//! |------------|---------------------------------------------------|
//! | [`hour`]   | `Hour`, `HourWindow`, `CycleId`                   |
//! | [`rng`]    | `SimRng` (the process-wide randomness source)     |
//! | [`error`]  | `CoreError`, `CoreResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod hour;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use hour::{CycleId, Hour, HourWindow};
pub use rng::SimRng;
