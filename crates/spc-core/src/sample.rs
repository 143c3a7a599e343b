// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::SpcError;

/// Advisory lower bound for statistically meaningful zone detection.
/// Shorter samples are accepted; detectors record a warning instead.
pub const RECOMMENDED_MIN_SAMPLE_LEN: usize = 30;

/// Borrowed, validated view over an ordered univariate sample.
///
/// The view only reads the caller's data; all derived artifacts are
/// freshly allocated per invocation.
#[derive(Clone, Copy, Debug)]
pub struct SampleView<'a> {
    pub values: &'a [f64],
}

impl<'a> SampleView<'a> {
    /// Constructs a validated `SampleView`.
    ///
    /// Rejects an empty slice and any non-finite value with
    /// [`SpcError::InvalidInput`].
    pub fn new(values: &'a [f64]) -> Result<Self, SpcError> {
        if values.is_empty() {
            return Err(SpcError::invalid_input(
                "sample must contain at least one value",
            ));
        }
        if let Some((idx, value)) = values
            .iter()
            .copied()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(SpcError::invalid_input(format!(
                "sample values must be finite: index {idx} has {value}"
            )));
        }
        Ok(Self { values })
    }

    pub fn n(&self) -> usize {
        self.values.len()
    }

    /// True when the sample is shorter than the advisory minimum.
    pub fn is_short(&self) -> bool {
        self.values.len() < RECOMMENDED_MIN_SAMPLE_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::{RECOMMENDED_MIN_SAMPLE_LEN, SampleView};
    use crate::SpcError;

    #[test]
    fn accepts_finite_values() {
        let values = [1.0, -2.5, 0.0, 42.0];
        let view = SampleView::new(&values).expect("finite sample should be valid");
        assert_eq!(view.n(), 4);
        assert!(view.is_short());
    }

    #[test]
    fn single_point_sample_is_valid() {
        let values = [7.0];
        let view = SampleView::new(&values).expect("n=1 is allowed");
        assert_eq!(view.n(), 1);
    }

    #[test]
    fn rejects_empty_sample() {
        let err = SampleView::new(&[]).expect_err("empty sample must fail");
        assert!(matches!(err, SpcError::InvalidInput(_)));
        assert!(err.to_string().contains("at least one value"));
    }

    #[test]
    fn rejects_nan_and_infinity_with_index() {
        let values = [1.0, f64::NAN, 3.0];
        let err = SampleView::new(&values).expect_err("NaN must fail");
        assert!(err.to_string().contains("index 1"));

        let values = [1.0, 2.0, f64::INFINITY];
        let err = SampleView::new(&values).expect_err("infinity must fail");
        assert!(err.to_string().contains("index 2"));
    }

    #[test]
    fn short_sample_threshold_is_advisory() {
        let values = vec![0.0; RECOMMENDED_MIN_SAMPLE_LEN];
        let view = SampleView::new(&values).expect("30 points should be valid");
        assert!(!view.is_short());
    }
}
