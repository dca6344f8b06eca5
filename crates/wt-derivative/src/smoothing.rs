//! Moving-average smoothing of derivative values.

use wt_core::Real;

/// Centered moving average over `window_width` samples.
///
/// The half-width is `window_width / 2`, so an even width averages
/// `window_width + 1` samples in the interior. Near the ends the window is
/// truncated to the valid range and fewer samples are averaged.
/// Widths of 0 or 1 return the input unchanged.
pub fn smooth(values: &[Real], window_width: usize) -> Vec<Real> {
    if window_width <= 1 {
        return values.to_vec();
    }

    let half = window_width / 2;
    let n = values.len();
    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half).min(n - 1);
            let window = &values[lo..=hi];
            window.iter().sum::<Real>() / window.len() as Real
        })
        .collect()
}
