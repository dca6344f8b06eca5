//! Time/value samples as imported from the data grid.

use crate::Real;

/// One imported row: a time and the value measured at that time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub time: Real,
    pub value: Real,
}

impl Sample {
    pub fn new(time: Real, value: Real) -> Self {
        Self { time, value }
    }
}

impl From<(Real, Real)> for Sample {
    fn from((time, value): (Real, Real)) -> Self {
        Self { time, value }
    }
}

/// Zip two index-aligned columns into samples. The shorter column bounds the result.
pub fn samples_from_columns(times: &[Real], values: &[Real]) -> Vec<Sample> {
    times
        .iter()
        .zip(values)
        .map(|(&time, &value)| Sample { time, value })
        .collect()
}

/// Split samples back into a time column and a value column.
pub fn split_columns(samples: &[Sample]) -> (Vec<Real>, Vec<Real>) {
    samples.iter().map(|s| (s.time, s.value)).unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_round_trip() {
        let samples = samples_from_columns(&[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0]);
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[1], Sample::new(2.0, 20.0));

        let (t, v) = split_columns(&samples);
        assert_eq!(t, vec![1.0, 2.0, 3.0]);
        assert_eq!(v, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn shorter_column_bounds_result() {
        let samples = samples_from_columns(&[1.0, 2.0], &[5.0]);
        assert_eq!(samples, vec![Sample::new(1.0, 5.0)]);
    }
}
