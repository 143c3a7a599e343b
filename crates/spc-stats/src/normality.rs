// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::descriptive::{excess_kurtosis, skewness};
use spc_core::{SampleView, SpcError};

/// Jarque-Bera test outcome.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JarqueBera {
    pub statistic: f64,
    pub p_value: f64,
}

/// Jarque-Bera normality test: `JB = n/6 * (g1^2 + g2^2/4)`.
///
/// The statistic is asymptotically chi-square with 2 degrees of
/// freedom, for which the survival function is exactly `exp(-JB/2)`.
/// Fails with [`SpcError::DegenerateSample`] when the sample has zero
/// dispersion, since both moments are undefined there.
pub fn jarque_bera(x: &SampleView<'_>) -> Result<JarqueBera, SpcError> {
    let g1 = skewness(x).ok_or_else(|| {
        SpcError::degenerate_sample("Jarque-Bera is undefined for a zero-dispersion sample")
    })?;
    let g2 = excess_kurtosis(x).ok_or_else(|| {
        SpcError::degenerate_sample("Jarque-Bera is undefined for a zero-dispersion sample")
    })?;
    let statistic = x.n() as f64 / 6.0 * (g1 * g1 + g2 * g2 / 4.0);
    if !statistic.is_finite() {
        return Err(SpcError::numerical_issue(format!(
            "non-finite Jarque-Bera statistic: {statistic}"
        )));
    }
    Ok(JarqueBera {
        statistic,
        p_value: (-statistic / 2.0).exp(),
    })
}
