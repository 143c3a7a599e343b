// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use spc_core::Zone;

/// The eight fixed-window pattern detectors.
///
/// Each rule flags a statistically improbable run of points; the rules
/// are independent of each other and of the single-point filters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    Alpha,
    Bravo,
    Charlie,
    Delta,
    Echo,
    Foxtrot,
    Golf,
    Hotel,
}

impl Rule {
    pub const ALL: [Rule; 8] = [
        Rule::Alpha,
        Rule::Bravo,
        Rule::Charlie,
        Rule::Delta,
        Rule::Echo,
        Rule::Foxtrot,
        Rule::Golf,
        Rule::Hotel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Bravo => "bravo",
            Self::Charlie => "charlie",
            Self::Delta => "delta",
            Self::Echo => "echo",
            Self::Foxtrot => "foxtrot",
            Self::Golf => "golf",
            Self::Hotel => "hotel",
        }
    }

    /// Fixed window length L. A window is only evaluated when it fits
    /// entirely within the sample.
    pub fn window_len(self) -> usize {
        match self {
            Self::Alpha => 1,
            Self::Bravo => 3,
            Self::Charlie => 5,
            Self::Delta => 7,
            Self::Echo => 7,
            Self::Foxtrot => 8,
            Self::Golf => 15,
            Self::Hotel => 14,
        }
    }

    /// One-line human-readable description for documentation and UI.
    pub fn description(self) -> &'static str {
        match self {
            Self::Alpha => "one point beyond three sigma from the mean",
            Self::Bravo => "two of three consecutive points beyond two sigma",
            Self::Charlie => "four of five consecutive points beyond one sigma",
            Self::Delta => "seven consecutive points strictly on one side of the mean",
            Self::Echo => "seven consecutive points strictly increasing or decreasing",
            Self::Foxtrot => "eight consecutive points all beyond one sigma",
            Self::Golf => "fifteen consecutive points all within one sigma",
            Self::Hotel => "fourteen consecutive points alternating up and down",
        }
    }
}

fn full_window(start: usize, len: usize) -> Vec<usize> {
    (start..start + len).collect()
}

/// Sliding count of qualifying labels over a fixed window; emits every
/// window whose count reaches `min_hits`.
fn scan_counted(
    labels: &[Zone],
    window: usize,
    min_hits: usize,
    qualifies: impl Fn(Zone) -> bool,
) -> Vec<Vec<usize>> {
    let n = labels.len();
    if window > n {
        return vec![];
    }
    let mut hits = labels[..window].iter().filter(|&&z| qualifies(z)).count();
    let mut runs = vec![];
    for start in 0..=(n - window) {
        if start > 0 {
            if qualifies(labels[start - 1]) {
                hits -= 1;
            }
            if qualifies(labels[start + window - 1]) {
                hits += 1;
            }
        }
        if hits >= min_hits {
            runs.push(full_window(start, window));
        }
    }
    runs
}

/// All window points strictly on one side of the mean, side fixed by
/// the first point. A point exactly on the mean breaks the window.
fn scan_one_sided(values: &[f64], mean: f64, window: usize) -> Vec<Vec<usize>> {
    let n = values.len();
    if window > n {
        return vec![];
    }
    let mut runs = vec![];
    for start in 0..=(n - window) {
        let first = values[start];
        let satisfied = if first > mean {
            values[start..start + window].iter().all(|&v| v > mean)
        } else if first < mean {
            values[start..start + window].iter().all(|&v| v < mean)
        } else {
            false
        };
        if satisfied {
            runs.push(full_window(start, window));
        }
    }
    runs
}

/// Strictly monotonic window, direction fixed by the first two points.
/// A repeated value breaks the window.
fn scan_monotonic(values: &[f64], window: usize) -> Vec<Vec<usize>> {
    let n = values.len();
    if window > n {
        return vec![];
    }
    let mut runs = vec![];
    for start in 0..=(n - window) {
        let w = &values[start..start + window];
        let satisfied = if w[0] < w[1] {
            w.windows(2).all(|pair| pair[0] < pair[1])
        } else if w[0] > w[1] {
            w.windows(2).all(|pair| pair[0] > pair[1])
        } else {
            false
        };
        if satisfied {
            runs.push(full_window(start, window));
        }
    }
    runs
}

/// Every step strictly alternates direction (up, down, up, ...).
/// A repeated value or a same-direction step breaks the window.
fn scan_alternating(values: &[f64], window: usize) -> Vec<Vec<usize>> {
    let n = values.len();
    if window > n {
        return vec![];
    }
    let mut runs = vec![];
    'windows: for start in 0..=(n - window) {
        let w = &values[start..start + window];
        let mut previous_up: Option<bool> = None;
        for pair in w.windows(2) {
            if pair[0] == pair[1] {
                continue 'windows;
            }
            let up = pair[1] > pair[0];
            if previous_up == Some(up) {
                continue 'windows;
            }
            previous_up = Some(up);
        }
        runs.push(full_window(start, window));
    }
    runs
}

/// Scans one rule over the sample.
///
/// `values`, `labels`, and `mean` must come from the same
/// classification pass; the output is a pure function of them. Runs
/// from adjacent window starts commonly overlap — that is the raw
/// contract, resolved later by the collapser if requested.
pub fn scan_rule(rule: Rule, values: &[f64], labels: &[Zone], mean: f64) -> Vec<Vec<usize>> {
    let window = rule.window_len();
    match rule {
        Rule::Alpha => scan_counted(labels, window, 1, |z| z == Zone::X),
        Rule::Bravo => scan_counted(labels, window, 2, |z| matches!(z, Zone::A | Zone::X)),
        Rule::Charlie => scan_counted(labels, window, 4, |z| z != Zone::C),
        Rule::Delta => scan_one_sided(values, mean, window),
        Rule::Echo => scan_monotonic(values, window),
        Rule::Foxtrot => scan_counted(labels, window, window, |z| z != Zone::C),
        Rule::Golf => scan_counted(labels, window, window, |z| z == Zone::C),
        Rule::Hotel => scan_alternating(values, window),
    }
}
