//! Registry error type.

use thiserror::Error;

/// Errors produced by `cw-routes`.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A route definition violates a construction invariant.  Fatal at
    /// start-up; the message names the offending route.
    #[error("configuration error for route {route:?}: {reason}")]
    Configuration { route: String, reason: String },

    #[error("registry has no routes")]
    Empty,

    #[error("route {0:?} not found")]
    NotFound(String),

    #[error("route file parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegistryError {
    pub(crate) fn config(route: &str, reason: impl Into<String>) -> Self {
        RegistryError::Configuration {
            route:  route.to_owned(),
            reason: reason.into(),
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
