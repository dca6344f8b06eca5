//! Derivative of pressure drop with respect to natural-log time.

use wt_core::{Real, Sample};

/// Windows narrower than this in log-time yield a zero derivative.
const MIN_LOG_SPAN: Real = 1e-6;

/// Windowed finite difference of `dp` against `ln(t)`.
///
/// For each point the window grows outward until it spans at least
/// `half_width` in log-time on each side or reaches the end of the series,
/// so windows near the ends are one-sided. One value is produced per input
/// point. Times must be positive; callers filter with
/// [`compute_pressure_drop`](crate::compute_pressure_drop) first.
pub fn compute_log_derivative(points: &[Sample], half_width: Real) -> Vec<Real> {
    let n = points.len();
    let log_t: Vec<Real> = points.iter().map(|p| p.time.ln()).collect();

    (0..n)
        .map(|i| {
            let center = log_t[i];
            let mut l = i;
            let mut r = i;
            while l > 0 && log_t[l] > center - half_width {
                l -= 1;
            }
            while r + 1 < n && log_t[r] < center + half_width {
                r += 1;
            }

            let num = points[r].value - points[l].value;
            let den = log_t[r] - log_t[l];
            if den.abs() > MIN_LOG_SPAN { num / den } else { 0.0 }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wt_core::samples_from_columns;

    fn assert_close(actual: f64, expected: f64) {
        let scale = actual.abs().max(expected.abs()).max(1.0);
        assert!(
            (actual - expected).abs() <= 1e-9 * scale,
            "got {actual}, expected {expected}"
        );
    }

    #[test]
    fn semilog_straight_line_has_constant_derivative() {
        // dp = 5 ln t + 2 -> derivative 5 everywhere
        let times: Vec<f64> = (0..20).map(|i| 1.5_f64.powi(i)).collect();
        let dp: Vec<f64> = times.iter().map(|t| 5.0 * t.ln() + 2.0).collect();
        let points = samples_from_columns(&times, &dp);

        let derivative = compute_log_derivative(&points, 0.3);
        assert_eq!(derivative.len(), points.len());
        for d in derivative {
            assert_close(d, 5.0);
        }
    }

    #[test]
    fn windows_are_clipped_at_ends() {
        let points = samples_from_columns(&[1.0, 2.0, 4.0], &[1.0, 2.0, 4.0]);
        let derivative = compute_log_derivative(&points, 10.0);
        // every window covers the whole series
        let expected = (4.0 - 1.0) / 4.0_f64.ln();
        for d in derivative {
            assert_close(d, expected);
        }
    }

    #[test]
    fn collapsed_window_gives_zero() {
        // identical times with zero half width: the window never grows
        let points = samples_from_columns(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]);
        let derivative = compute_log_derivative(&points, 0.0);
        assert_eq!(derivative, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn first_window_reaches_right_neighbour() {
        let points = samples_from_columns(&[1.0, 10.0, 100.0, 1000.0], &[1.0, 3.0, 7.0, 8.0]);
        let derivative = compute_log_derivative(&points, 0.1);
        // i=0: l stays at 0, r moves to 1
        let expected = (3.0 - 1.0) / 10.0_f64.ln();
        assert_close(derivative[0], expected);
        // i=3: r stays at 3, l moves to 2
        let expected_last = (8.0 - 7.0) / (1000.0_f64.ln() - 100.0_f64.ln());
        assert_close(derivative[3], expected_last);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(compute_log_derivative(&[], 0.5).is_empty());
    }
}
