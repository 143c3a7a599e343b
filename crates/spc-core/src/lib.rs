// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Shared data model for the SPC zone/rule engine: validated sample
//! views, sigma-zone types, the error taxonomy, and run diagnostics.

pub mod diagnostics;
pub mod error;
pub mod sample;
pub mod zones;

pub use diagnostics::Diagnostics;
pub use error::SpcError;
pub use sample::{RECOMMENDED_MIN_SAMPLE_LEN, SampleView};
pub use zones::{
    SigmaBand, Zone, ZoneBoundary, ZONE_A_PROBABILITY, ZONE_B_PROBABILITY, ZONE_C_PROBABILITY,
    sigma_bands,
};
