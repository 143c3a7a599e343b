// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

/// Theoretical probability of a normal observation falling within 1σ.
pub const ZONE_C_PROBABILITY: f64 = 0.6827;
/// Theoretical probability of a normal observation falling within 2σ.
pub const ZONE_B_PROBABILITY: f64 = 0.9545;
/// Theoretical probability of a normal observation falling within 3σ.
pub const ZONE_A_PROBABILITY: f64 = 0.9973;

/// Sigma-zone label for one sample point.
///
/// `C` is within 1σ of the mean, `B` within 2σ, `A` within 3σ, and `X`
/// beyond all three zones. Exactly one label is assigned per index.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    C,
    B,
    A,
    X,
}

impl Zone {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::C => "C",
            Self::B => "B",
            Self::A => "A",
            Self::X => "X",
        }
    }

    /// Theoretical zone-membership probability under normality.
    /// Informational only; detection logic never consults it.
    pub fn theoretical_probability(self) -> Option<f64> {
        match self {
            Self::C => Some(ZONE_C_PROBABILITY),
            Self::B => Some(ZONE_B_PROBABILITY),
            Self::A => Some(ZONE_A_PROBABILITY),
            Self::X => None,
        }
    }
}

/// Half-open zone boundary `[lower, upper)` around the mean.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneBoundary {
    pub lower: f64,
    pub upper: f64,
}

impl ZoneBoundary {
    /// Boundary at `k` standard deviations around `mean`.
    pub fn around(mean: f64, sigma: f64, k: u32) -> Self {
        let spread = f64::from(k) * sigma;
        Self {
            lower: mean - spread,
            upper: mean + spread,
        }
    }

    /// Half-open membership test: `lower <= v < upper`.
    ///
    /// A value exactly on the upper edge falls outside, so a point at
    /// `mean + 3σ` classifies as [`Zone::X`].
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value < self.upper
    }
}

/// Informational sigma band carried in reports for 1..=5σ.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SigmaBand {
    pub k: u32,
    pub lower: f64,
    pub upper: f64,
}

/// Bands at 1..=`max_k` standard deviations around `mean`.
pub fn sigma_bands(mean: f64, sigma: f64, max_k: u32) -> Vec<SigmaBand> {
    (1..=max_k)
        .map(|k| {
            let boundary = ZoneBoundary::around(mean, sigma, k);
            SigmaBand {
                k,
                lower: boundary.lower,
                upper: boundary.upper,
            }
        })
        .collect()
}
