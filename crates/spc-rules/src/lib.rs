// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Control-chart zone/rule engine.
//!
//! Data flow: raw sample → [`classify_zones`] → per-index zone labels →
//! the eight rule scanners → per-rule run lists → optional
//! [`collapse_report`] → [`detect_patterns`] report.

pub mod classifier;
pub mod collapse;
pub mod report;
pub mod rules;

pub use classifier::{ZoneClassification, classify_zones};
pub use collapse::collapse_runs;
pub use report::{PatternReport, RuleRuns, SampleSummary, collapse_report, detect_patterns};
pub use rules::{Rule, scan_rule};
