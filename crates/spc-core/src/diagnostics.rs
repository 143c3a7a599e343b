// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::borrow::Cow;

/// Structured run metadata captured from a detection pass.
///
/// The engine carries observability in-band rather than through a
/// logging framework: notes record decisions taken during the run
/// (e.g. the degenerate-sample policy), warnings record advisory
/// conditions that did not stop the run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostics {
    pub n: usize,
    pub runtime_ms: Option<u64>,
    pub notes: Vec<String>,
    pub warnings: Vec<String>,
    pub algorithm: Cow<'static, str>,
    pub engine_version: Option<String>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            n: 0,
            runtime_ms: None,
            notes: vec![],
            warnings: vec![],
            algorithm: Cow::Borrowed(""),
            engine_version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }
    }
}
