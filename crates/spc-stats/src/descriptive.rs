// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use spc_core::{SampleView, SpcError};

/// First and third quartile of a sample (type-7 linear interpolation).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub q3: f64,
}

pub fn mean(x: &SampleView<'_>) -> f64 {
    x.values.iter().sum::<f64>() / x.n() as f64
}

fn sum_squared_deviations(x: &SampleView<'_>) -> f64 {
    let m = mean(x);
    x.values.iter().map(|v| (v - m) * (v - m)).sum()
}

/// Population variance (n denominator).
pub fn population_variance(x: &SampleView<'_>) -> f64 {
    sum_squared_deviations(x) / x.n() as f64
}

/// Sample variance (n-1 denominator); 0.0 when n < 2.
pub fn sample_variance(x: &SampleView<'_>) -> f64 {
    if x.n() < 2 {
        return 0.0;
    }
    sum_squared_deviations(x) / (x.n() - 1) as f64
}

pub fn population_std_dev(x: &SampleView<'_>) -> f64 {
    population_variance(x).sqrt()
}

pub fn sample_std_dev(x: &SampleView<'_>) -> f64 {
    sample_variance(x).sqrt()
}

fn sorted_values(x: &SampleView<'_>) -> Vec<f64> {
    let mut sorted = x.values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

pub fn median(x: &SampleView<'_>) -> f64 {
    median_of_sorted(&sorted_values(x))
}

fn quantile_of_sorted(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let below = position.floor() as usize;
    let above = position.ceil() as usize;
    if below == above {
        return sorted[below];
    }
    let fraction = position - below as f64;
    sorted[below] + fraction * (sorted[above] - sorted[below])
}

/// Type-7 quartiles, matching the convention of common numeric stacks.
pub fn quartiles(x: &SampleView<'_>) -> Quartiles {
    let sorted = sorted_values(x);
    Quartiles {
        q1: quantile_of_sorted(&sorted, 0.25),
        q3: quantile_of_sorted(&sorted, 0.75),
    }
}

/// Most frequent value; the smallest wins ties. `None` when every
/// value occurs exactly once.
pub fn mode(x: &SampleView<'_>) -> Option<f64> {
    let sorted = sorted_values(x);
    let mut best_value = sorted[0];
    let mut best_len = 1usize;
    let mut run_value = sorted[0];
    let mut run_len = 1usize;
    for &value in &sorted[1..] {
        if value == run_value {
            run_len += 1;
        } else {
            run_value = value;
            run_len = 1;
        }
        if run_len > best_len {
            best_len = run_len;
            best_value = run_value;
        }
    }
    if best_len > 1 { Some(best_value) } else { None }
}

pub fn min(x: &SampleView<'_>) -> f64 {
    x.values.iter().copied().fold(f64::INFINITY, f64::min)
}

pub fn max(x: &SampleView<'_>) -> f64 {
    x.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn central_moment(x: &SampleView<'_>, order: i32) -> f64 {
    let m = mean(x);
    x.values.iter().map(|v| (v - m).powi(order)).sum::<f64>() / x.n() as f64
}

/// Moment skewness g1 = m3 / m2^(3/2). `None` for zero dispersion.
pub fn skewness(x: &SampleView<'_>) -> Option<f64> {
    let m2 = central_moment(x, 2);
    if m2 <= 0.0 {
        return None;
    }
    Some(central_moment(x, 3) / m2.powf(1.5))
}

/// Excess kurtosis g2 = m4 / m2^2 - 3. `None` for zero dispersion.
pub fn excess_kurtosis(x: &SampleView<'_>) -> Option<f64> {
    let m2 = central_moment(x, 2);
    if m2 <= 0.0 {
        return None;
    }
    Some(central_moment(x, 4) / (m2 * m2) - 3.0)
}

/// Raw (unscaled) median absolute deviation from the sample median.
pub fn median_abs_deviation(x: &SampleView<'_>) -> f64 {
    let center = median(x);
    let mut deviations: Vec<f64> = x.values.iter().map(|v| (v - center).abs()).collect();
    deviations.sort_by(f64::total_cmp);
    median_of_sorted(&deviations)
}

/// Pearson correlation between two equal-length samples.
///
/// Fails with [`SpcError::InvalidInput`] on a length mismatch and with
/// [`SpcError::DegenerateSample`] when either side has zero dispersion.
pub fn pearson_correlation(x: &SampleView<'_>, y: &SampleView<'_>) -> Result<f64, SpcError> {
    if x.n() != y.n() {
        return Err(SpcError::invalid_input(format!(
            "correlation requires equal lengths: got {} and {}",
            x.n(),
            y.n()
        )));
    }
    let mean_x = mean(x);
    let mean_y = mean(y);
    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (vx, vy) in x.values.iter().zip(y.values.iter()) {
        let dx = vx - mean_x;
        let dy = vy - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x <= 0.0 || var_y <= 0.0 {
        return Err(SpcError::degenerate_sample(
            "correlation is undefined for a zero-dispersion side",
        ));
    }
    let r = covariance / (var_x * var_y).sqrt();
    if !r.is_finite() {
        return Err(SpcError::numerical_issue(format!(
            "non-finite correlation: {r}"
        )));
    }
    Ok(r)
}

/// Pearson correlation of the sample against its index sequence
/// 0..n-1, a cheap linear-trend indicator carried in reports.
pub fn index_correlation(x: &SampleView<'_>) -> Result<f64, SpcError> {
    let indices: Vec<f64> = (0..x.n()).map(|i| i as f64).collect();
    let index_view = SampleView::new(&indices)?;
    pearson_correlation(x, &index_view)
}
