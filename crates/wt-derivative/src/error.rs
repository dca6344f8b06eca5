//! Error types for derivative computation.

use thiserror::Error;

/// Errors raised by the derivative engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DerivativeError {
    #[error("Insufficient data: {retained} valid points after filtering, at least {required} required")]
    InsufficientData { retained: usize, required: usize },

    #[error("Invalid parameter: {what} = {value}")]
    InvalidParameter { what: &'static str, value: f64 },
}

pub type DerivativeResult<T> = Result<T, DerivativeError>;
