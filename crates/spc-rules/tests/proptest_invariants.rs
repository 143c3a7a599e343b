// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use spc_core::{SampleView, Zone};
use spc_rules::{Rule, classify_zones, collapse_report, detect_patterns};

const MIN_PROPTEST_CASES: u32 = 256;

fn proptest_cases() -> u32 {
    std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .map(|parsed| parsed.max(MIN_PROPTEST_CASES))
        .unwrap_or(MIN_PROPTEST_CASES)
}

fn sample_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e4..1.0e4f64, 1..150)
}

fn flagged_indices(runs: &[Vec<usize>]) -> Vec<usize> {
    let mut indices: Vec<usize> = runs.iter().flatten().copied().collect();
    indices.sort_unstable();
    indices.dedup();
    indices
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: proptest_cases(),
        failure_persistence: Some(Box::new(FileFailurePersistence::Off)),
        ..ProptestConfig::default()
    })]

    #[test]
    fn classification_emits_one_label_per_index(values in sample_strategy()) {
        let view = SampleView::new(&values).expect("generated sample is finite");
        let classification = classify_zones(&view);
        prop_assert_eq!(classification.labels.len(), values.len());

        if classification.std_dev > 0.0 {
            let [c, b, a] = classification.boundaries;
            prop_assert!(a.lower < b.lower && b.lower < c.lower);
            prop_assert!(c.upper < b.upper && b.upper < a.upper);

            for (&value, &label) in values.iter().zip(&classification.labels) {
                let expected = if c.contains(value) {
                    Zone::C
                } else if b.contains(value) {
                    Zone::B
                } else if a.contains(value) {
                    Zone::A
                } else {
                    Zone::X
                };
                prop_assert_eq!(label, expected);
            }
        } else {
            prop_assert!(classification.degenerate);
            prop_assert!(classification.labels.iter().all(|&z| z == Zone::C));
        }
    }

    #[test]
    fn collapse_preserves_flagged_indices_and_is_idempotent(values in sample_strategy()) {
        let view = SampleView::new(&values).expect("generated sample is finite");
        let raw = detect_patterns(&view, false).expect("detect should succeed");
        let collapsed = collapse_report(&raw);

        for rule in Rule::ALL {
            prop_assert_eq!(
                flagged_indices(raw.rules.get(rule)),
                flagged_indices(collapsed.rules.get(rule)),
                "rule {} changed its flagged index set",
                rule.name()
            );
            // Collapsed runs are disjoint, sorted, maximal.
            let runs = collapsed.rules.get(rule);
            for run in runs {
                prop_assert!(!run.is_empty());
                for pair in run.windows(2) {
                    prop_assert_eq!(pair[1], pair[0] + 1);
                }
            }
            for pair in runs.windows(2) {
                let end_of_previous = *pair[0].last().expect("non-empty run");
                prop_assert!(pair[1][0] > end_of_previous + 1);
            }
        }

        prop_assert_eq!(collapse_report(&collapsed), collapsed.clone());
    }

    #[test]
    fn no_rule_emits_a_truncated_or_out_of_bounds_window(values in sample_strategy()) {
        let view = SampleView::new(&values).expect("generated sample is finite");
        let report = detect_patterns(&view, false).expect("detect should succeed");
        for rule in Rule::ALL {
            for run in report.rules.get(rule) {
                prop_assert_eq!(run.len(), rule.window_len());
                prop_assert!(run[0] + rule.window_len() <= values.len());
                for pair in run.windows(2) {
                    prop_assert_eq!(pair[1], pair[0] + 1);
                }
            }
            // Raw runs arrive in increasing start order.
            for pair in report.rules.get(rule).windows(2) {
                prop_assert!(pair[0][0] < pair[1][0]);
            }
        }
    }

    #[test]
    fn detection_is_deterministic(values in sample_strategy()) {
        let view = SampleView::new(&values).expect("generated sample is finite");
        let first = detect_patterns(&view, true).expect("detect should succeed");
        let second = detect_patterns(&view, true).expect("detect should succeed");
        prop_assert_eq!(first.rules, second.rules);
        prop_assert_eq!(first.summary, second.summary);
        prop_assert_eq!(first.boundaries, second.boundaries);
    }
}
