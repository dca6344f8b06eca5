//! Pressure-transient derivative engine.
//!
//! Turns a raw time/pressure series into a pressure-drop series and its
//! derivative with respect to natural-log time (the Bourdet-style diagnostic
//! used on log-log plots), with optional moving-average smoothing.
//!
//! All functions are pure: they borrow their input and return fresh vectors.

pub mod analysis;
pub mod error;
pub mod log_derivative;
pub mod pressure_drop;
pub mod smoothing;

pub use analysis::{DerivativeAnalysis, DerivativeParams, analyze};
pub use error::{DerivativeError, DerivativeResult};
pub use log_derivative::compute_log_derivative;
pub use pressure_drop::{MIN_VALID_POINTS, TestType, compute_pressure_drop};
pub use smoothing::smooth;
