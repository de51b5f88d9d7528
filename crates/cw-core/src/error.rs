//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::Hour;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("hour {0} is out of range (expected 0..=23)")]
    InvalidHour(u32),

    #[error("hour window {first}..={last} is empty")]
    EmptyWindow { first: Hour, last: Hour },
}

/// Shorthand result type for `cw-core`.
pub type CoreResult<T> = Result<T, CoreError>;
