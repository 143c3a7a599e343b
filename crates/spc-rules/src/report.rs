// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::classifier::{ZoneClassification, classify_zones};
use crate::collapse::collapse_runs;
use crate::rules::{Rule, scan_rule};
use spc_core::{Diagnostics, SampleView, SigmaBand, SpcError, ZoneBoundary, sigma_bands};
use spc_stats::{
    JarqueBera, excess_kurtosis, index_correlation, jarque_bera, max, median_abs_deviation, min,
    mode, skewness,
};
use std::borrow::Cow;
use std::time::Instant;

const ALGORITHM_NAME: &str = "zone_rules";
const REPORT_SIGMA_BANDS: u32 = 5;

/// Per-rule run lists, addressed structurally so the collapser can
/// visit every rule field without touching scalar statistics.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleRuns {
    pub alpha: Vec<Vec<usize>>,
    pub bravo: Vec<Vec<usize>>,
    pub charlie: Vec<Vec<usize>>,
    pub delta: Vec<Vec<usize>>,
    pub echo: Vec<Vec<usize>>,
    pub foxtrot: Vec<Vec<usize>>,
    pub golf: Vec<Vec<usize>>,
    pub hotel: Vec<Vec<usize>>,
}

impl RuleRuns {
    pub fn get(&self, rule: Rule) -> &[Vec<usize>] {
        match rule {
            Rule::Alpha => &self.alpha,
            Rule::Bravo => &self.bravo,
            Rule::Charlie => &self.charlie,
            Rule::Delta => &self.delta,
            Rule::Echo => &self.echo,
            Rule::Foxtrot => &self.foxtrot,
            Rule::Golf => &self.golf,
            Rule::Hotel => &self.hotel,
        }
    }

    fn get_mut(&mut self, rule: Rule) -> &mut Vec<Vec<usize>> {
        match rule {
            Rule::Alpha => &mut self.alpha,
            Rule::Bravo => &mut self.bravo,
            Rule::Charlie => &mut self.charlie,
            Rule::Delta => &mut self.delta,
            Rule::Echo => &mut self.echo,
            Rule::Foxtrot => &mut self.foxtrot,
            Rule::Golf => &mut self.golf,
            Rule::Hotel => &mut self.hotel,
        }
    }

    /// Applies `f` to every rule field.
    fn map(&self, f: impl Fn(&[Vec<usize>]) -> Vec<Vec<usize>>) -> Self {
        let mut mapped = Self::default();
        for rule in Rule::ALL {
            *mapped.get_mut(rule) = f(self.get(rule));
        }
        mapped
    }
}

/// Descriptive and normality statistics embedded in the report.
///
/// Moment statistics that are undefined for a zero-dispersion sample
/// are `None`; NaN never appears in a report.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SampleSummary {
    pub n: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub median: f64,
    pub mode: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub skewness: Option<f64>,
    pub excess_kurtosis: Option<f64>,
    pub median_abs_deviation: f64,
    pub index_correlation: Option<f64>,
    pub jarque_bera: Option<JarqueBera>,
}

/// Aggregated detection report: zone boundaries, summary statistics,
/// and one run list per rule (raw or collapsed, per `collapsed`).
///
/// Zone labels stay internal to the detection pass; callers that need
/// them use [`classify_zones`] directly.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PatternReport {
    pub summary: SampleSummary,
    /// Detection boundaries in C, B, A order.
    pub boundaries: [ZoneBoundary; 3],
    /// Informational bands for 1..=5 sigma.
    pub sigma_bands: Vec<SigmaBand>,
    pub rules: RuleRuns,
    pub collapsed: bool,
    pub diagnostics: Diagnostics,
}

fn degenerate_to_none<T>(result: Result<T, SpcError>) -> Result<Option<T>, SpcError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(SpcError::DegenerateSample(_)) => Ok(None),
        Err(err) => Err(err),
    }
}

fn summarize(
    sample: &SampleView<'_>,
    classification: &ZoneClassification,
) -> Result<SampleSummary, SpcError> {
    Ok(SampleSummary {
        n: sample.n(),
        mean: classification.mean,
        std_dev: classification.std_dev,
        median: classification.median,
        mode: mode(sample),
        min: min(sample),
        max: max(sample),
        skewness: skewness(sample),
        excess_kurtosis: excess_kurtosis(sample),
        median_abs_deviation: median_abs_deviation(sample),
        index_correlation: degenerate_to_none(index_correlation(sample))?,
        jarque_bera: degenerate_to_none(jarque_bera(sample))?,
    })
}

/// Runs the full detection pass: classify zones, scan the eight rules,
/// optionally collapse, and merge in the summary statistics.
pub fn detect_patterns(
    sample: &SampleView<'_>,
    collapse: bool,
) -> Result<PatternReport, SpcError> {
    let started_at = Instant::now();
    let classification = classify_zones(sample);

    let mut rules = RuleRuns::default();
    for rule in Rule::ALL {
        *rules.get_mut(rule) = scan_rule(
            rule,
            sample.values,
            &classification.labels,
            classification.mean,
        );
    }
    if collapse {
        rules = rules.map(collapse_runs);
    }

    let summary = summarize(sample, &classification)?;

    let mut notes = vec![];
    let mut warnings = vec![];
    if classification.degenerate {
        notes.push("degenerate sample: zero dispersion, all points assigned zone C".to_string());
    }
    if sample.is_short() {
        warnings.push(format!(
            "sample has {} points; at least 30 are recommended for meaningful zone detection",
            sample.n()
        ));
    }

    let diagnostics = Diagnostics {
        n: sample.n(),
        runtime_ms: Some(u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX)),
        notes,
        warnings,
        algorithm: Cow::Borrowed(ALGORITHM_NAME),
        ..Diagnostics::default()
    };

    Ok(PatternReport {
        summary,
        boundaries: classification.boundaries,
        sigma_bands: sigma_bands(
            classification.mean,
            classification.std_dev,
            REPORT_SIGMA_BANDS,
        ),
        rules,
        collapsed: collapse,
        diagnostics,
    })
}

/// Collapses every rule's run list into disjoint maximal contiguous
/// ranges. Scalar statistics pass through untouched. Idempotent:
/// collapsing an already-collapsed report returns an equal report.
pub fn collapse_report(report: &PatternReport) -> PatternReport {
    PatternReport {
        summary: report.summary.clone(),
        boundaries: report.boundaries,
        sigma_bands: report.sigma_bands.clone(),
        rules: report.rules.map(collapse_runs),
        collapsed: true,
        diagnostics: report.diagnostics.clone(),
    }
}
