// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use thiserror::Error;

/// Error taxonomy for the SPC engine.
///
/// Every error is synchronous and fatal to the call that raised it;
/// there is no partial output and nothing to roll back.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum SpcError {
    /// Input is empty, non-numeric, non-finite, or an explicitly
    /// supplied configuration value is invalid. Raised before any
    /// detection logic runs.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The sample has zero dispersion and the requested operation has
    /// no meaningful output without it.
    #[error("degenerate sample: {0}")]
    DegenerateSample(String),

    /// A non-finite intermediate value escaped an otherwise valid
    /// computation.
    #[error("numerical issue: {0}")]
    NumericalIssue(String),
}

impl SpcError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn degenerate_sample(message: impl Into<String>) -> Self {
        Self::DegenerateSample(message.into())
    }

    pub fn numerical_issue(message: impl Into<String>) -> Self {
        Self::NumericalIssue(message.into())
    }

    /// Stable machine-readable code, used by the CLI error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::DegenerateSample(_) => "degenerate_sample",
            Self::NumericalIssue(_) => "numerical_issue",
        }
    }
}
