// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Statistics collaborators for the SPC engine: descriptive summary
//! statistics, the Jarque-Bera normality test, and independent
//! single-pass outlier filters. Everything operates on a validated
//! [`spc_core::SampleView`] and never mutates caller data.

pub mod descriptive;
pub mod filters;
pub mod normality;

pub use descriptive::{
    Quartiles, excess_kurtosis, index_correlation, max, mean, median, median_abs_deviation, min,
    mode, pearson_correlation, population_std_dev, population_variance, quartiles, sample_std_dev,
    sample_variance, skewness,
};
pub use filters::{
    IqrConfig, ModifiedZScoreConfig, ZScoreConfig, iqr_outliers, modified_z_score_outliers,
    z_score_outliers,
};
pub use normality::{JarqueBera, jarque_bera};
