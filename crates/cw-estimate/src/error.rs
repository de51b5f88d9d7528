use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EstimateError {
    /// Capacity was zero.  Unreachable for routes from a validated
    /// registry, but `classify` is public and takes a raw capacity.
    #[error("cannot compute load for crowd {crowd_count}: capacity is zero")]
    DivisionByZero { crowd_count: u32 },

    #[error("estimator configuration error: {0}")]
    Config(String),
}

pub type EstimateResult<T> = Result<T, EstimateError>;
