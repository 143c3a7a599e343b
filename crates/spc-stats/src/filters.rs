// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::descriptive::{mean, median, median_abs_deviation, quartiles, sample_std_dev};
use spc_core::{SampleView, SpcError};

const DEFAULT_Z_THRESHOLD: f64 = 3.0;
const DEFAULT_MODIFIED_Z_THRESHOLD: f64 = 3.5;
const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;
/// Consistency constant relating MAD to the standard deviation of a
/// normal distribution (Iglewicz-Hoaglin modified z-score).
const MODIFIED_Z_SCALE: f64 = 0.6745;

fn validate_positive_finite(name: &str, value: f64) -> Result<(), SpcError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SpcError::invalid_input(format!(
            "{name} must be finite and > 0.0; got {value}"
        )));
    }
    Ok(())
}

/// Configuration for [`z_score_outliers`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZScoreConfig {
    pub threshold: f64,
}

impl Default for ZScoreConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_Z_THRESHOLD,
        }
    }
}

impl ZScoreConfig {
    pub fn validate(&self) -> Result<(), SpcError> {
        validate_positive_finite("ZScoreConfig.threshold", self.threshold)
    }
}

/// Configuration for [`modified_z_score_outliers`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModifiedZScoreConfig {
    pub threshold: f64,
}

impl Default for ModifiedZScoreConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MODIFIED_Z_THRESHOLD,
        }
    }
}

impl ModifiedZScoreConfig {
    pub fn validate(&self) -> Result<(), SpcError> {
        validate_positive_finite("ModifiedZScoreConfig.threshold", self.threshold)
    }
}

/// Configuration for [`iqr_outliers`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IqrConfig {
    pub multiplier: f64,
}

impl Default for IqrConfig {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_IQR_MULTIPLIER,
        }
    }
}

impl IqrConfig {
    pub fn validate(&self) -> Result<(), SpcError> {
        validate_positive_finite("IqrConfig.multiplier", self.multiplier)
    }
}

/// Indices whose |z-score| exceeds the threshold.
pub fn z_score_outliers(
    x: &SampleView<'_>,
    config: &ZScoreConfig,
) -> Result<Vec<usize>, SpcError> {
    config.validate()?;
    let sigma = sample_std_dev(x);
    if sigma <= 0.0 {
        return Err(SpcError::degenerate_sample(
            "z-score filtering is undefined for a zero-dispersion sample",
        ));
    }
    let center = mean(x);
    Ok(x.values
        .iter()
        .enumerate()
        .filter(|(_, v)| ((*v - center) / sigma).abs() > config.threshold)
        .map(|(idx, _)| idx)
        .collect())
}

/// Indices whose modified z-score `0.6745 * (v - median) / MAD`
/// exceeds the threshold in magnitude.
pub fn modified_z_score_outliers(
    x: &SampleView<'_>,
    config: &ModifiedZScoreConfig,
) -> Result<Vec<usize>, SpcError> {
    config.validate()?;
    let mad = median_abs_deviation(x);
    if mad <= 0.0 {
        return Err(SpcError::degenerate_sample(
            "modified z-score filtering is undefined when MAD is zero",
        ));
    }
    let center = median(x);
    Ok(x.values
        .iter()
        .enumerate()
        .filter(|(_, v)| (MODIFIED_Z_SCALE * (*v - center) / mad).abs() > config.threshold)
        .map(|(idx, _)| idx)
        .collect())
}

/// Indices outside `[Q1 - m*IQR, Q3 + m*IQR]`.
pub fn iqr_outliers(x: &SampleView<'_>, config: &IqrConfig) -> Result<Vec<usize>, SpcError> {
    config.validate()?;
    let q = quartiles(x);
    let spread = config.multiplier * (q.q3 - q.q1);
    let lower = q.q1 - spread;
    let upper = q.q3 + spread;
    Ok(x.values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v < lower || **v > upper)
        .map(|(idx, _)| idx)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{
        IqrConfig, ModifiedZScoreConfig, ZScoreConfig, iqr_outliers, modified_z_score_outliers,
        z_score_outliers,
    };
    use spc_core::{SampleView, SpcError};

    fn view(values: &[f64]) -> SampleView<'_> {
        SampleView::new(values).expect("test sample should be valid")
    }

    const SPIKED: [f64; 10] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];

    #[test]
    fn config_defaults() {
        assert_eq!(ZScoreConfig::default().threshold, 3.0);
        assert_eq!(ModifiedZScoreConfig::default().threshold, 3.5);
        assert_eq!(IqrConfig::default().multiplier, 1.5);
    }

    #[test]
    fn non_finite_or_non_positive_threshold_fails_fast() {
        for threshold in [f64::NAN, f64::INFINITY, 0.0, -1.0] {
            let err = z_score_outliers(&view(&SPIKED), &ZScoreConfig { threshold })
                .expect_err("invalid threshold must fail");
            assert!(matches!(err, SpcError::InvalidInput(_)));
        }
        let err = iqr_outliers(&view(&SPIKED), &IqrConfig { multiplier: -0.5 })
            .expect_err("negative multiplier must fail");
        assert!(err.to_string().contains("IqrConfig.multiplier"));
    }

    #[test]
    fn z_score_flags_spike_at_lowered_threshold() {
        // The spike sits at ~2.84 sigma, below the default threshold.
        let flagged = z_score_outliers(&view(&SPIKED), &ZScoreConfig::default())
            .expect("filter should succeed");
        assert!(flagged.is_empty());

        let flagged = z_score_outliers(&view(&SPIKED), &ZScoreConfig { threshold: 2.5 })
            .expect("filter should succeed");
        assert_eq!(flagged, vec![9]);
    }

    #[test]
    fn modified_z_score_flags_spike_at_default_threshold() {
        let flagged = modified_z_score_outliers(&view(&SPIKED), &ModifiedZScoreConfig::default())
            .expect("filter should succeed");
        assert_eq!(flagged, vec![9]);
    }

    #[test]
    fn iqr_flags_spike_with_default_multiplier() {
        let flagged =
            iqr_outliers(&view(&SPIKED), &IqrConfig::default()).expect("filter should succeed");
        assert_eq!(flagged, vec![9]);
    }

    #[test]
    fn zero_dispersion_is_degenerate_for_z_filters() {
        let constant = [5.0; 12];
        let err = z_score_outliers(&view(&constant), &ZScoreConfig::default())
            .expect_err("zero sigma must fail");
        assert!(matches!(err, SpcError::DegenerateSample(_)));

        let err = modified_z_score_outliers(&view(&constant), &ModifiedZScoreConfig::default())
            .expect_err("zero MAD must fail");
        assert!(matches!(err, SpcError::DegenerateSample(_)));
    }

    #[test]
    fn iqr_on_constant_sample_flags_nothing() {
        let constant = [5.0; 12];
        let flagged = iqr_outliers(&view(&constant), &IqrConfig::default())
            .expect("IQR filter tolerates zero spread");
        assert!(flagged.is_empty());
    }
}
