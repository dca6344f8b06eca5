//! Pressure drop relative to a reference pressure.

use crate::error::{DerivativeError, DerivativeResult};
use wt_core::{Real, Sample};

/// A derivative needs a left and a right neighbour in log-time.
pub const MIN_VALID_POINTS: usize = 3;

/// Well-test regime the samples were recorded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TestType {
    /// Pressure decline under flow, measured against a fixed reference pressure.
    #[default]
    Drawdown,
    /// Pressure recovery after shut-in, measured against the first sample.
    Buildup,
}

/// Compute `(t, dp)` for every sample with `t > 0` and `dp > 0`.
///
/// Samples failing either condition are dropped, so the result can be shorter
/// than `samples`. `reference_pressure` is only read for [`TestType::Drawdown`];
/// buildup uses the pressure of the first input sample as the shut-in reference.
pub fn compute_pressure_drop(
    samples: &[Sample],
    test_type: TestType,
    reference_pressure: Real,
) -> DerivativeResult<Vec<Sample>> {
    let Some(first) = samples.first() else {
        return Err(DerivativeError::InsufficientData {
            retained: 0,
            required: MIN_VALID_POINTS,
        });
    };
    let shut_in = first.value;

    let points: Vec<Sample> = samples
        .iter()
        .filter_map(|s| {
            let dp = match test_type {
                TestType::Drawdown => (reference_pressure - s.value).abs(),
                TestType::Buildup => (s.value - shut_in).abs(),
            };
            (s.time > 0.0 && dp > 0.0).then_some(Sample::new(s.time, dp))
        })
        .collect();

    if points.len() < MIN_VALID_POINTS {
        return Err(DerivativeError::InsufficientData {
            retained: points.len(),
            required: MIN_VALID_POINTS,
        });
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wt_core::samples_from_columns;

    fn series() -> Vec<Sample> {
        samples_from_columns(
            &[1.0, 2.0, 4.0, 8.0, 16.0],
            &[100.0, 98.0, 95.0, 90.0, 82.0],
        )
    }

    #[test]
    fn drawdown_drops_zero_delta() {
        let points = compute_pressure_drop(&series(), TestType::Drawdown, 100.0).unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], Sample::new(2.0, 2.0));
        assert_eq!(points[3], Sample::new(16.0, 18.0));
    }

    #[test]
    fn drawdown_uses_absolute_difference() {
        let points = compute_pressure_drop(&series(), TestType::Drawdown, 80.0).unwrap();
        assert_eq!(points.len(), 5);
        assert_eq!(points[0].value, 20.0);
        assert_eq!(points[4].value, 2.0);
    }

    #[test]
    fn buildup_references_first_sample() {
        let samples = samples_from_columns(&[0.5, 1.0, 2.0, 4.0], &[50.0, 60.0, 65.0, 67.0]);
        // reference_pressure is ignored for buildup
        let points = compute_pressure_drop(&samples, TestType::Buildup, 1.0e6).unwrap();
        let dp: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(dp, vec![10.0, 15.0, 17.0]);
    }

    #[test]
    fn non_positive_time_is_dropped() {
        let samples = samples_from_columns(
            &[-1.0, 0.0, 1.0, 2.0, 3.0],
            &[90.0, 90.0, 90.0, 80.0, 70.0],
        );
        let points = compute_pressure_drop(&samples, TestType::Drawdown, 100.0).unwrap();
        assert!(points.iter().all(|p| p.time > 0.0));
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn too_few_points_is_an_error() {
        let samples = samples_from_columns(&[1.0, 2.0, 3.0], &[100.0, 99.0, 100.0]);
        let err = compute_pressure_drop(&samples, TestType::Drawdown, 100.0).unwrap_err();
        assert_eq!(
            err,
            DerivativeError::InsufficientData {
                retained: 1,
                required: 3
            }
        );
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = compute_pressure_drop(&[], TestType::Buildup, 0.0).unwrap_err();
        assert!(matches!(
            err,
            DerivativeError::InsufficientData { retained: 0, .. }
        ));
    }
}
