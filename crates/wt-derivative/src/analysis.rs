//! Full derivative pipeline: pressure drop, log derivative, optional smoothing.

use crate::error::{DerivativeError, DerivativeResult};
use crate::log_derivative::compute_log_derivative;
use crate::pressure_drop::{TestType, compute_pressure_drop};
use crate::smoothing::smooth;
use wt_core::{Real, Sample, ensure_finite};

/// Parameters of one derivative analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DerivativeParams {
    pub test_type: TestType,
    /// Initial reservoir pressure; only used for drawdown tests.
    pub reference_pressure: Real,
    /// Half-width of the log-time window ("L-spacing").
    pub l_spacing: Real,
    /// Moving-average width applied to the derivative, if any.
    pub smoothing: Option<usize>,
}

impl Default for DerivativeParams {
    fn default() -> Self {
        Self {
            test_type: TestType::Drawdown,
            reference_pressure: 0.0,
            l_spacing: 0.2,
            smoothing: None,
        }
    }
}

impl DerivativeParams {
    /// Width passed to [`smooth`]; 1 (identity) when smoothing is off.
    pub fn smoothing_window(&self) -> usize {
        self.smoothing.unwrap_or(1)
    }
}

/// Output of [`analyze`]. `points` and `derivative` have equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivativeAnalysis {
    pub points: Vec<Sample>,
    pub derivative: Vec<Real>,
}

impl DerivativeAnalysis {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

pub fn analyze(samples: &[Sample], params: &DerivativeParams) -> DerivativeResult<DerivativeAnalysis> {
    let l_spacing = ensure_finite(params.l_spacing, "l_spacing").map_err(|_| {
        DerivativeError::InvalidParameter {
            what: "l_spacing",
            value: params.l_spacing,
        }
    })?;
    if l_spacing <= 0.0 {
        return Err(DerivativeError::InvalidParameter {
            what: "l_spacing",
            value: l_spacing,
        });
    }

    let points = compute_pressure_drop(samples, params.test_type, params.reference_pressure)?;
    tracing::debug!(
        input = samples.len(),
        retained = points.len(),
        dropped = samples.len() - points.len(),
        "pressure drop computed"
    );

    let raw = compute_log_derivative(&points, l_spacing);
    let derivative = smooth(&raw, params.smoothing_window());
    tracing::debug!(
        points = points.len(),
        smoothing = params.smoothing_window(),
        "log derivative computed"
    );

    Ok(DerivativeAnalysis { points, derivative })
}
