//! Scalar type and the conversions shared by the analysis crates.

use crate::WtError;

/// Pressure, time and rate values.
pub type Real = f64;

/// Reject NaN and infinities in analysis parameters; `what` names the value
/// in the error.
pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, WtError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(WtError::NonFinite { what, value: v })
    }
}

/// Convert a grid cell to a number.
///
/// Text that does not parse as a number converts to `0.0`; the data grid never
/// reports conversion failures.
pub fn parse_cell(text: &str) -> Real {
    text.trim().parse::<Real>().unwrap_or(0.0)
}
