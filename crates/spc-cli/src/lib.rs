// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use serde_json::Value;
use spc_core::{SampleView, SpcError};
use spc_rules::{PatternReport, detect_patterns};

/// Parses a JSON document into a sample, coercing numeric strings.
///
/// The document must be a non-empty array; every entry must be a
/// finite number or a string that parses to one. Anything else is a
/// fatal [`SpcError::InvalidInput`] — silently dropping entries would
/// shift run indices relative to the caller's data.
pub fn parse_sample_json(text: &str) -> Result<Vec<f64>, SpcError> {
    let document: Value = serde_json::from_str(text)
        .map_err(|err| SpcError::invalid_input(format!("invalid JSON input: {err}")))?;
    coerce_sample(&document)
}

/// Coerces a parsed JSON document into a sample of finite numbers.
pub fn coerce_sample(document: &Value) -> Result<Vec<f64>, SpcError> {
    let entries = document
        .as_array()
        .ok_or_else(|| SpcError::invalid_input("input must be a JSON array of numbers"))?;
    if entries.is_empty() {
        return Err(SpcError::invalid_input("input array must not be empty"));
    }

    let mut values = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        let value = match entry {
            Value::Number(number) => number.as_f64().ok_or_else(|| {
                SpcError::invalid_input(format!("entry {idx} is not representable as f64"))
            })?,
            Value::String(text) => text.trim().parse::<f64>().map_err(|_| {
                SpcError::invalid_input(format!(
                    "entry {idx} is not a numeric string: {text:?}"
                ))
            })?,
            other => {
                return Err(SpcError::invalid_input(format!(
                    "entry {idx} must be a number or numeric string; got {other}"
                )));
            }
        };
        if !value.is_finite() {
            return Err(SpcError::invalid_input(format!(
                "entry {idx} is not finite: {value}"
            )));
        }
        values.push(value);
    }
    Ok(values)
}

/// Runs the full detection pass over an owned sample.
pub fn run_detect(values: &[f64], collapse: bool) -> Result<PatternReport, SpcError> {
    let view = SampleView::new(values)?;
    detect_patterns(&view, collapse)
}
