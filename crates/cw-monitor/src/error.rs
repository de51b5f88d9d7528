use thiserror::Error;

use crate::RouteFailure;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("monitor configuration error: {0}")]
    Config(String),

    /// A route failed while `strict` mode was on.
    #[error("{0}")]
    Route(RouteFailure),

    #[error("status output failed")]
    OutputFailed,
}

pub type MonitorResult<T> = Result<T, MonitorError>;
